//! Hall sensor pulse capture
//!
//! `PulseCapture` is the state shared between the edge handler (one call to
//! [`PulseCapture::record_pulse`] per rising edge) and the polled
//! [`Speedometer`](crate::Speedometer). Every field is an atomic so the whole
//! struct can live in a `static` and be touched from both contexts without a
//! lock.
//!
//! There is exactly one writer per field in normal operation: the edge
//! handler writes RPM, distance and the timestamp, the main loop writes
//! configuration and zeroes the RPM on timeout. Readers may observe a new RPM
//! with an old timestamp for one poll; the values only drive a human-readable
//! display.
//!
//! The timestamp is a wrapping `u32` microsecond counter (≈71.6 minutes per
//! wrap); intervals are taken with wrapping subtraction. The first edge after
//! boot measures from timestamp 0.

use portable_atomic::{AtomicF64, AtomicU32, Ordering};

use crate::calibration::Calibration;
use crate::units::MICROS_PER_MINUTE;

/// Default debounce interval: 40ms is ≈200 km/h on a 700mm wheel
pub const DEFAULT_MIN_INTERVAL_US: u32 = 40_000;

/// What happened to a single edge
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseOutcome {
    /// Edge accepted; RPM recomputed from the interval
    Accepted {
        /// Time since the previous accepted edge
        interval_us: u32,
        /// Resulting wheel speed
        rpm: f64,
    },
    /// Edge arrived sooner than the minimum interval and was ignored
    Debounced {
        /// Time since the previous accepted edge
        interval_us: u32,
    },
}

/// Lock-free pulse state shared between edge handler and main loop
#[derive(Debug)]
pub struct PulseCapture {
    /// Timestamp of the last accepted edge (µs), stored last
    last_pulse_us: AtomicU32,
    /// Wheel speed from the last accepted interval
    rpm: AtomicF64,
    /// Resettable trip distance (m)
    current_distance_m: AtomicF64,
    /// Odometer distance (m)
    total_distance_m: AtomicF64,
    /// Distance per revolution (m), from the active calibration
    circumference_m: AtomicF64,
    /// Debounce threshold (µs)
    min_interval_us: AtomicU32,
}

impl Default for PulseCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseCapture {
    /// Create an uncalibrated capture with no edges seen
    pub const fn new() -> Self {
        Self {
            last_pulse_us: AtomicU32::new(0),
            rpm: AtomicF64::new(0.0),
            current_distance_m: AtomicF64::new(0.0),
            total_distance_m: AtomicF64::new(0.0),
            circumference_m: AtomicF64::new(0.0),
            min_interval_us: AtomicU32::new(DEFAULT_MIN_INTERVAL_US),
        }
    }

    /// Record a rising edge seen at `now_us`
    ///
    /// Called from the edge handler. Never blocks and never fails.
    pub fn record_pulse(&self, now_us: u32) -> PulseOutcome {
        let interval_us = now_us.wrapping_sub(self.last_pulse_us.load(Ordering::Relaxed));
        if interval_us == 0 || interval_us < self.min_interval_us.load(Ordering::Relaxed) {
            return PulseOutcome::Debounced { interval_us };
        }

        let rpm = MICROS_PER_MINUTE / interval_us as f64;
        self.rpm.store(rpm, Ordering::Relaxed);
        self.add_distance(self.circumference_m.load(Ordering::Relaxed));

        // Timestamp goes last so a reader never pairs it with older values
        self.last_pulse_us.store(now_us, Ordering::Release);

        PulseOutcome::Accepted { interval_us, rpm }
    }

    fn add_distance(&self, meters: f64) {
        self.current_distance_m.fetch_add(meters, Ordering::Relaxed);
        self.total_distance_m.fetch_add(meters, Ordering::Relaxed);
    }

    /// Zero the RPM
    ///
    /// Called by the speedometer when the sensor has been silent too long.
    pub fn mark_stopped(&self) {
        self.rpm.store(0.0, Ordering::Relaxed);
    }

    /// Use the circumference of `calibration` for future edges
    ///
    /// Distance already accumulated is left untouched.
    pub fn apply_calibration(&self, calibration: &Calibration) {
        self.circumference_m
            .store(calibration.circumference_m(), Ordering::Relaxed);
    }

    /// Set the debounce threshold
    pub fn set_min_interval_us(&self, interval_us: u32) {
        self.min_interval_us.store(interval_us, Ordering::Relaxed);
    }

    /// Override the current RPM
    pub fn set_rpm(&self, rpm: f64) {
        self.rpm.store(rpm, Ordering::Relaxed);
    }

    /// Override the trip distance (m)
    pub fn set_current_distance_m(&self, meters: f64) {
        self.current_distance_m.store(meters, Ordering::Relaxed);
    }

    /// Override the odometer distance (m)
    pub fn set_total_distance_m(&self, meters: f64) {
        self.total_distance_m.store(meters, Ordering::Relaxed);
    }

    /// Timestamp of the last accepted edge (µs)
    pub fn last_pulse_us(&self) -> u32 {
        self.last_pulse_us.load(Ordering::Acquire)
    }

    /// RPM from the last accepted interval
    pub fn rpm(&self) -> f64 {
        self.rpm.load(Ordering::Relaxed)
    }

    /// Trip distance (m)
    pub fn current_distance_m(&self) -> f64 {
        self.current_distance_m.load(Ordering::Relaxed)
    }

    /// Odometer distance (m)
    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m.load(Ordering::Relaxed)
    }

    /// Distance counted per accepted edge (m)
    pub fn circumference_m(&self) -> f64 {
        self.circumference_m.load(Ordering::Relaxed)
    }

    /// Debounce threshold (µs)
    pub fn min_interval_us(&self) -> u32 {
        self.min_interval_us.load(Ordering::Relaxed)
    }
}

//! Speedometer
//!
//! Main-loop side of the measurement pipeline. [`Speedometer::update`] must
//! be called at a steady cadence: it is the only place where a silent
//! sensor is recognised as a stopped wheel.

use crate::calibration::{Calibration, CalibrationError};
use crate::capture::PulseCapture;
use crate::config::{BikeConfig, DisplayConfig, DisplayMode, DEFAULT_MAX_INTERVAL_US};
use crate::readout::SpeedReadout;
use crate::units::{km_to_meters, meters_to_km, SpeedUnit};

/// Speed, distance and top speed derived from a [`PulseCapture`]
#[derive(Debug)]
pub struct Speedometer<'a> {
    /// Shared state written by the edge handler
    capture: &'a PulseCapture,
    /// Active wheel calibration
    calibration: Calibration,
    /// Stop timeout (µs)
    max_interval_us: u32,
    /// Speed at the last update (km/h)
    current_speed_kmh: f64,
    /// Highest speed since the last trip reset (km/h)
    top_speed_kmh: f64,
    /// Screen mode and unit
    display: DisplayConfig,
}

impl<'a> Speedometer<'a> {
    /// Create a speedometer and push the calibration into the capture
    pub fn new(capture: &'a PulseCapture, calibration: Calibration) -> Self {
        capture.apply_calibration(&calibration);
        Self {
            capture,
            calibration,
            max_interval_us: DEFAULT_MAX_INTERVAL_US,
            current_speed_kmh: 0.0,
            top_speed_kmh: 0.0,
            display: DisplayConfig::default(),
        }
    }

    /// Create a speedometer from a parsed bike configuration
    pub fn from_config(
        capture: &'a PulseCapture,
        config: &BikeConfig,
    ) -> Result<Self, CalibrationError> {
        let calibration = Calibration::from_diameter_mm(config.wheel.diameter_mm)?;
        let mut speedometer = Self::new(capture, calibration);
        speedometer.set_min_interval_us(config.hall.min_interval_us);
        speedometer.set_max_interval_us(config.hall.max_interval_us);
        speedometer.display = config.display;
        Ok(speedometer)
    }

    /// Reconcile the captured RPM into a speed reading
    ///
    /// # Arguments
    /// - `now_us`: current time on the same microsecond clock as the edges
    pub fn update(&mut self, now_us: u32) {
        let silent_us = now_us.wrapping_sub(self.capture.last_pulse_us());

        let rpm = if silent_us > self.max_interval_us {
            self.capture.mark_stopped();
            0.0
        } else {
            self.capture.rpm()
        };

        self.current_speed_kmh = self.calibration.speed_kmh(rpm);
        if self.current_speed_kmh > self.top_speed_kmh {
            self.top_speed_kmh = self.current_speed_kmh;
        }
    }

    /// Readout for the current display mode
    ///
    /// Returns `None` in [`DisplayMode::CurrentDistance`], which has no
    /// screen layout.
    pub fn readout(&self) -> Option<SpeedReadout> {
        match self.display.mode {
            DisplayMode::CurrentSpeed => Some(SpeedReadout::from_kmh(
                self.current_speed_kmh,
                self.display.unit,
            )),
            DisplayMode::CurrentDistance => None,
        }
    }

    /// Change the wheel diameter (mm)
    ///
    /// Only affects edges and updates from now on. An invalid diameter is
    /// rejected and the previous calibration stays active.
    pub fn set_wheel_diameter(&mut self, diameter_mm: f32) -> Result<(), CalibrationError> {
        let calibration = Calibration::from_diameter_mm(diameter_mm)?;
        self.capture.apply_calibration(&calibration);
        self.calibration = calibration;
        Ok(())
    }

    /// Zero the trip distance and top speed; the odometer keeps counting
    pub fn reset_trip(&mut self) {
        self.capture.set_current_distance_m(0.0);
        self.top_speed_kmh = 0.0;
    }

    /// Set the debounce threshold (µs)
    pub fn set_min_interval_us(&mut self, interval_us: u32) {
        self.capture.set_min_interval_us(interval_us);
    }

    /// Set the stop timeout (µs)
    pub fn set_max_interval_us(&mut self, interval_us: u32) {
        self.max_interval_us = interval_us;
    }

    /// Override the captured RPM
    pub fn set_rpm(&mut self, rpm: f64) {
        self.capture.set_rpm(rpm);
    }

    /// Override the current speed (km/h) until the next update
    pub fn set_current_speed(&mut self, speed_kmh: f64) {
        self.current_speed_kmh = speed_kmh;
    }

    /// Override the top speed (km/h)
    pub fn set_top_speed(&mut self, speed_kmh: f64) {
        self.top_speed_kmh = speed_kmh;
    }

    /// Override the trip distance (km)
    pub fn set_current_distance(&mut self, distance_km: f64) {
        self.capture.set_current_distance_m(km_to_meters(distance_km));
    }

    /// Override the odometer distance (km)
    pub fn set_total_distance(&mut self, distance_km: f64) {
        self.capture.set_total_distance_m(km_to_meters(distance_km));
    }

    /// Set the screen mode
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display.mode = mode;
    }

    /// Set the displayed speed unit
    pub fn set_speed_unit(&mut self, unit: SpeedUnit) {
        self.display.unit = unit;
    }

    /// Current speed (km/h)
    pub fn current_speed(&self) -> f64 {
        self.current_speed_kmh
    }

    /// Top speed (km/h)
    pub fn top_speed(&self) -> f64 {
        self.top_speed_kmh
    }

    /// Trip distance (km)
    pub fn current_distance(&self) -> f64 {
        meters_to_km(self.capture.current_distance_m())
    }

    /// Odometer distance (km)
    pub fn total_distance(&self) -> f64 {
        meters_to_km(self.capture.total_distance_m())
    }

    /// Captured RPM
    pub fn rpm(&self) -> f64 {
        self.capture.rpm()
    }

    /// Stop timeout (µs)
    pub fn max_interval_us(&self) -> u32 {
        self.max_interval_us
    }

    /// Active calibration
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Screen mode and unit
    pub fn display_config(&self) -> DisplayConfig {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PulseOutcome;
    use proptest::prelude::*;

    fn speedometer(capture: &PulseCapture) -> Speedometer<'_> {
        let calibration = Calibration::from_diameter_mm(700.0).unwrap();
        let mut speedometer = Speedometer::new(capture, calibration);
        speedometer.set_min_interval_us(40_000);
        speedometer.set_max_interval_us(2_000_000);
        speedometer
    }

    #[test]
    fn test_speed_from_pulses() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);

        capture.record_pulse(1_000_000);
        capture.record_pulse(1_300_000);
        speedo.update(1_400_000);

        // 200 RPM on a 700mm wheel
        assert!((speedo.current_speed() - 26.389_378_29).abs() < 1e-6);
        assert_eq!(speedo.top_speed(), speedo.current_speed());
    }

    #[test]
    fn test_timeout_zeroes_speed() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);

        capture.record_pulse(0);
        capture.record_pulse(300_000);
        speedo.update(2_300_000);
        assert!(speedo.current_speed() > 0.0);

        speedo.update(2_300_001);
        assert_eq!(speedo.current_speed(), 0.0);
        assert_eq!(speedo.rpm(), 0.0);
        assert!(speedo.top_speed() > 0.0);
    }

    #[test]
    fn test_restart_after_stop() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);

        capture.record_pulse(0);
        capture.record_pulse(300_000);
        speedo.update(2_400_000);
        assert_eq!(speedo.current_speed(), 0.0);

        // First edge after the stop measures from the last one before it
        assert_eq!(
            capture.record_pulse(2_500_000),
            PulseOutcome::Accepted {
                interval_us: 2_200_000,
                rpm: 60_000_000.0 / 2_200_000.0
            }
        );
        speedo.update(2_500_001);
        assert!((speedo.rpm() - 27.272_727_27).abs() < 1e-6);
        assert!((speedo.current_speed() - 3.598_551_58).abs() < 1e-6);
    }

    #[test]
    fn test_first_edge_after_boot() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);

        capture.record_pulse(1_000_000);
        speedo.update(1_000_001);
        assert_eq!(speedo.rpm(), 60.0);
        assert!(speedo.current_speed() > 0.0);
    }

    #[test]
    fn test_timeout_across_timer_wrap() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);

        capture.record_pulse(u32::MAX - 400_000);
        capture.record_pulse(u32::MAX - 100_000);
        // Counter wrapped; 1.1s since the last edge is still inside the timeout
        speedo.update(1_000_000);
        assert!(speedo.current_speed() > 0.0);
    }

    #[test]
    fn test_readout_units() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);
        speedo.set_current_speed(20.0);

        assert_eq!(speedo.readout().unwrap().digits, [2, 0, 0]);

        speedo.set_speed_unit(SpeedUnit::Mph);
        let readout = speedo.readout().unwrap();
        assert_eq!(readout.digits, [1, 2, 4]);
        assert_eq!(readout.unit, SpeedUnit::Mph);

        // Presentation only: canonical speed is untouched
        assert_eq!(speedo.current_speed(), 20.0);
    }

    #[test]
    fn test_distance_mode_has_no_readout() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);
        speedo.set_display_mode(DisplayMode::CurrentDistance);
        assert!(speedo.readout().is_none());
        assert_eq!(speedo.display_config().mode, DisplayMode::CurrentDistance);
    }

    #[test]
    fn test_wheel_change_is_not_retroactive() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);

        capture.record_pulse(0);
        capture.record_pulse(300_000);
        let before = speedo.total_distance();
        let old_scale = speedo.calibration().kmh_per_rpm();

        speedo.set_wheel_diameter(500.0).unwrap();
        assert_eq!(speedo.total_distance(), before);
        assert!(speedo.calibration().kmh_per_rpm() < old_scale);
        assert!((capture.circumference_m() - speedo.calibration().circumference_m()).abs() < 1e-12);

        capture.record_pulse(600_000);
        let added_km = speedo.total_distance() - before;
        assert!((added_km - 0.5 * core::f64::consts::PI / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_diameter_keeps_calibration() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);
        let before = *speedo.calibration();

        assert_eq!(
            speedo.set_wheel_diameter(0.0),
            Err(CalibrationError::InvalidDiameter)
        );
        assert_eq!(*speedo.calibration(), before);
        assert_eq!(capture.circumference_m(), before.circumference_m());
    }

    #[test]
    fn test_reset_trip() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);

        capture.record_pulse(0);
        capture.record_pulse(300_000);
        speedo.update(300_000);
        let total = speedo.total_distance();

        speedo.reset_trip();
        assert_eq!(speedo.current_distance(), 0.0);
        assert_eq!(speedo.top_speed(), 0.0);
        assert_eq!(speedo.total_distance(), total);
    }

    #[test]
    fn test_distance_setters() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);
        speedo.set_total_distance(1_234.5);
        speedo.set_current_distance(12.5);

        assert!((speedo.total_distance() - 1_234.5).abs() < 1e-9);
        assert!((speedo.current_distance() - 12.5).abs() < 1e-9);
        assert!((capture.total_distance_m() - 1_234_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_overrides() {
        let capture = PulseCapture::new();
        let mut speedo = speedometer(&capture);
        capture.record_pulse(0);

        speedo.set_top_speed(40.0);
        speedo.set_rpm(100.0);
        speedo.update(500_000);
        assert_eq!(speedo.rpm(), 100.0);
        assert!((speedo.current_speed() - 13.194_689_14).abs() < 1e-6);
        assert_eq!(speedo.top_speed(), 40.0);

        // Replaced by the next update
        speedo.set_current_speed(55.0);
        assert_eq!(speedo.current_speed(), 55.0);
        speedo.update(600_000);
        assert!(speedo.current_speed() < 55.0);
    }

    #[test]
    fn test_from_config() {
        let capture = PulseCapture::new();
        let mut config = BikeConfig::default();
        config.wheel.diameter_mm = 622.0;
        config.hall.min_interval_us = 25_000;
        config.hall.max_interval_us = 3_000_000;
        config.display.unit = SpeedUnit::Mph;

        let speedo = Speedometer::from_config(&capture, &config).unwrap();
        assert_eq!(speedo.calibration().diameter_mm(), 622.0);
        assert_eq!(capture.min_interval_us(), 25_000);
        assert_eq!(speedo.max_interval_us(), 3_000_000);
        assert_eq!(speedo.display_config().unit, SpeedUnit::Mph);

        config.wheel.diameter_mm = -1.0;
        assert!(Speedometer::from_config(&capture, &config).is_err());
    }

    proptest! {
        #[test]
        fn prop_top_speed_never_decreases(
            steps in proptest::collection::vec((40_000u32..3_000_000, any::<bool>()), 1..40)
        ) {
            let capture = PulseCapture::new();
            let mut speedo = speedometer(&capture);
            let mut now = 0u32;
            let mut top = speedo.top_speed();

            for (interval, pulse) in steps {
                now = now.wrapping_add(interval);
                if pulse {
                    capture.record_pulse(now);
                }
                speedo.update(now);
                prop_assert!(speedo.top_speed() >= top);
                prop_assert!(speedo.top_speed() >= speedo.current_speed());
                top = speedo.top_speed();
            }
        }

        #[test]
        fn prop_silence_means_zero_speed(
            interval in 40_000u32..2_000_000,
            silence in 2_000_001u32..60_000_000
        ) {
            let capture = PulseCapture::new();
            let mut speedo = speedometer(&capture);
            capture.record_pulse(0);
            capture.record_pulse(interval);

            speedo.update(interval.wrapping_add(silence));
            prop_assert_eq!(speedo.current_speed(), 0.0);
        }
    }
}

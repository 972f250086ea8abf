//! Board-agnostic core logic for the bike computer firmware
//!
//! This crate contains everything between the Hall sensor edge and the
//! digits on screen that does not depend on specific hardware:
//!
//! - Wheel calibration (diameter to circumference and RPM scale)
//! - Pulse capture (debounce, RPM, distance) shared with the edge handler
//! - Speedometer (timeout zeroing, speed, top speed, trip reset)
//! - Readout formatting (rounding and digit splitting, unit conversion)
//! - Configuration types and the embedded TOML parser
//! - Clock trait for the microsecond timebase

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod calibration;
pub mod capture;
pub mod config;
pub mod readout;
pub mod speedometer;
pub mod traits;
pub mod units;

pub use calibration::{Calibration, CalibrationError};
pub use capture::{PulseCapture, PulseOutcome};
pub use readout::{SpeedReadout, BLANK_DIGIT};
pub use speedometer::Speedometer;
pub use units::SpeedUnit;

//! Wheel calibration
//!
//! The only user-supplied calibration input is the wheel diameter. The
//! circumference (distance per pulse) and the RPM → km/h factor are derived
//! from it together and cannot be set on their own.

use core::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::units::{METERS_PER_KM, MINUTES_PER_HOUR, MM_PER_METER};

/// Calibration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Diameter is zero, negative, NaN or infinite
    InvalidDiameter,
}

/// Derived wheel calibration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    diameter_mm: f32,
    circumference_m: f64,
    kmh_per_rpm: f64,
}

impl Calibration {
    /// Derive a calibration from the wheel diameter in millimetres
    pub fn from_diameter_mm(diameter_mm: f32) -> Result<Self, CalibrationError> {
        if !diameter_mm.is_finite() || diameter_mm <= 0.0 {
            return Err(CalibrationError::InvalidDiameter);
        }

        let diameter_m = diameter_mm as f64 / MM_PER_METER;
        let circumference_m = diameter_m * PI;

        Ok(Self {
            diameter_mm,
            circumference_m,
            // metres per revolution × revolutions per hour → km/h
            kmh_per_rpm: circumference_m * (MINUTES_PER_HOUR / METERS_PER_KM),
        })
    }

    /// Wheel diameter in millimetres
    pub const fn diameter_mm(&self) -> f32 {
        self.diameter_mm
    }

    /// Distance travelled per revolution, in metres
    pub const fn circumference_m(&self) -> f64 {
        self.circumference_m
    }

    /// Speed in km/h for one revolution per minute
    pub const fn kmh_per_rpm(&self) -> f64 {
        self.kmh_per_rpm
    }

    /// Speed in km/h at the given RPM
    pub fn speed_kmh(&self, rpm: f64) -> f64 {
        rpm * self.kmh_per_rpm
    }
}

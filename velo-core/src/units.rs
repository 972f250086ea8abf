//! Units and conversion constants
//!
//! Speeds are stored in km/h and distances in metres everywhere in the
//! firmware. Other units only exist at presentation time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Microseconds in one minute (one pulse per revolution → RPM numerator)
pub const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Minutes per hour
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Metres per kilometre
pub const METERS_PER_KM: f64 = 1000.0;

/// Millimetres per metre
pub const MM_PER_METER: f64 = 1000.0;

/// km/h → mph
pub const KMH_TO_MPH: f64 = 0.621_371_192_2;

/// Speed unit shown on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpeedUnit {
    /// Kilometres per hour
    #[default]
    Kmh,
    /// Miles per hour
    Mph,
}

impl SpeedUnit {
    /// Label printed next to the digits
    pub const fn label(self) -> &'static str {
        match self {
            SpeedUnit::Kmh => "km/h",
            SpeedUnit::Mph => "mph",
        }
    }

    /// Convert a canonical km/h value into this unit
    pub fn from_kmh(self, kmh: f64) -> f64 {
        match self {
            SpeedUnit::Kmh => kmh,
            SpeedUnit::Mph => kmh * KMH_TO_MPH,
        }
    }
}

/// Metres to kilometres
pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

/// Kilometres to metres
pub fn km_to_meters(km: f64) -> f64 {
    km * METERS_PER_KM
}

//! Bike configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::capture::DEFAULT_MIN_INTERVAL_US;
use crate::units::SpeedUnit;

/// Default wheel diameter: 700c road wheel
pub const DEFAULT_WHEEL_DIAMETER_MM: f32 = 700.0;

/// Default stop timeout: 2s is ≈4 km/h on a 700mm wheel
pub const DEFAULT_MAX_INTERVAL_US: u32 = 2_000_000;

/// Wheel configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelConfig {
    /// Outer wheel diameter including tyre (mm)
    pub diameter_mm: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            diameter_mm: DEFAULT_WHEEL_DIAMETER_MM,
        }
    }
}

/// Hall sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HallConfig {
    /// Edges closer together than this are bounce (µs)
    pub min_interval_us: u32,
    /// No edge for longer than this means the wheel stopped (µs)
    pub max_interval_us: u32,
    /// Enable the internal pull-up (open-drain sensors)
    pub pull_up: bool,
}

impl Default for HallConfig {
    fn default() -> Self {
        Self {
            min_interval_us: DEFAULT_MIN_INTERVAL_US,
            max_interval_us: DEFAULT_MAX_INTERVAL_US,
            pull_up: true,
        }
    }
}

/// What the main screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayMode {
    /// Big-digit current speed
    #[default]
    CurrentSpeed,
    /// Trip distance (no screen layout defined yet)
    CurrentDistance,
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Screen mode
    pub mode: DisplayMode,
    /// Unit for displayed speed
    pub unit: SpeedUnit,
}

/// Complete bike configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BikeConfig {
    /// Wheel calibration input
    pub wheel: WheelConfig,
    /// Hall sensor thresholds
    pub hall: HallConfig,
    /// Screen settings
    pub display: DisplayConfig,
}

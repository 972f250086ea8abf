//! Speed readout formatting
//!
//! Turns a speed into the three big digits shown on the LCD: tens, ones
//! and tenths. The value is rounded to the nearest 0.1 by adding 0.05 and
//! truncating, so `23.47` reads `23.5` and `9.95` reads `10.0`. A leading
//! zero is replaced by [`BLANK_DIGIT`] so `9.4` reads ` 9.4`.

use core::fmt::Write;

use heapless::String;

use crate::units::SpeedUnit;

/// Digit value that renders as an empty cell
pub const BLANK_DIGIT: u8 = 10;

/// Added before truncation to round half up to one decimal
pub const ROUNDING_OFFSET: f64 = 0.05;

/// Largest value the two integer digits can show
const MAX_DISPLAY_DIGITS: [u8; 3] = [9, 9, 9];

/// Formatted speed for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedReadout {
    /// Tens (or [`BLANK_DIGIT`]), ones, tenths
    pub digits: [u8; 3],
    /// Unit the digits are expressed in
    pub unit: SpeedUnit,
}

impl SpeedReadout {
    /// Build a readout from a canonical km/h speed
    pub fn from_kmh(speed_kmh: f64, unit: SpeedUnit) -> Self {
        Self {
            digits: split_digits(unit.from_kmh(speed_kmh)),
            unit,
        }
    }

    /// Tens digit, [`BLANK_DIGIT`] below 10
    pub const fn tens(&self) -> u8 {
        self.digits[0]
    }

    /// Ones digit
    pub const fn ones(&self) -> u8 {
        self.digits[1]
    }

    /// First decimal digit
    pub const fn tenths(&self) -> u8 {
        self.digits[2]
    }

    /// Plain-text form, e.g. `" 9.5 km/h"`
    pub fn to_text(&self) -> String<12> {
        let mut text = String::new();
        let tens = match self.tens() {
            BLANK_DIGIT => ' ',
            d => char::from(b'0' + d),
        };
        // Longest output is "99.9 km/h", well within capacity
        let _ = write!(
            text,
            "{}{}.{} {}",
            tens,
            self.ones(),
            self.tenths(),
            self.unit.label()
        );
        text
    }
}

/// Split a display value into tens, ones and tenths
///
/// Negative and NaN values read as zero. Values that round to 100 or more
/// saturate at `99.9`. Rounding is done in `f64`, so values on a rounding
/// boundary (e.g. `9.95`) can read one tenth higher than an `f32` pipeline.
pub fn split_digits(value: f64) -> [u8; 3] {
    let value = if value >= 0.0 { value } else { 0.0 };
    let rounded = value + ROUNDING_OFFSET;

    // Non-negative, so the cast truncates like modf's integer part
    let whole = rounded as u32;
    if whole >= 100 {
        return MAX_DISPLAY_DIGITS;
    }
    let fraction = rounded - whole as f64;

    let tens = (whole / 10) as u8;
    let ones = (whole % 10) as u8;
    let tenths = ((fraction * 10.0) as u8).min(9);

    [if tens == 0 { BLANK_DIGIT } else { tens }, ones, tenths]
}

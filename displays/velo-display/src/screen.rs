//! Speed screen
//!
//! Lays a [`SpeedReadout`] out on a 16x2 character LCD using the big-digit
//! font. Only cells that belong to a changed element are rewritten.

use velo_core::SpeedReadout;

use crate::backend::{CharacterLcd, LcdError};
use crate::font::{print_big, DECIMAL_POINT_GLYPH};

/// Left column of the tens digit
pub const TENS_COL: u8 = 0;

/// Left column of the ones digit
pub const ONES_COL: u8 = 4;

/// Left column of the tenths digit
pub const TENTHS_COL: u8 = 8;

/// Column of the decimal point (bottom row)
pub const DECIMAL_POINT_COL: u8 = 7;

/// Column of the unit label (bottom row)
pub const UNIT_COL: u8 = 12;

/// Width reserved for the unit label
const UNIT_WIDTH: usize = 4;

/// Big-digit speed screen
///
/// Remembers the last readout so unchanged frames cost no LCD traffic.
#[derive(Debug, Clone, Default)]
pub struct SpeedScreen {
    /// Readout currently on the display
    shown: Option<SpeedReadout>,
}

impl SpeedScreen {
    /// Create a screen that will draw everything on the first render
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Forget what is on the display (e.g. after `clear`)
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Readout currently on the display
    pub fn shown(&self) -> Option<&SpeedReadout> {
        self.shown.as_ref()
    }

    /// Draw `readout`, skipping elements that did not change
    ///
    /// Returns `true` if anything was written.
    pub fn render<L: CharacterLcd>(
        &mut self,
        lcd: &mut L,
        readout: &SpeedReadout,
    ) -> Result<bool, LcdError> {
        let previous = self.shown.take();
        if previous.as_ref() == Some(readout) {
            self.shown = previous;
            return Ok(false);
        }

        const COLUMNS: [u8; 3] = [TENS_COL, ONES_COL, TENTHS_COL];
        for (i, (&col, &digit)) in COLUMNS.iter().zip(readout.digits.iter()).enumerate() {
            if previous.map(|p| p.digits[i]) != Some(digit) {
                print_big(lcd, col, digit)?;
            }
        }

        match previous {
            Some(p) if p.unit == readout.unit => {}
            _ => {
                lcd.set_cursor(UNIT_COL, 1)?;
                // Pad so "mph" fully overwrites "km/h"
                let label = readout.unit.label();
                lcd.print(label)?;
                for _ in label.len()..UNIT_WIDTH {
                    lcd.write_byte(b' ')?;
                }
            }
        }

        if previous.is_none() {
            lcd.set_cursor(DECIMAL_POINT_COL, 1)?;
            lcd.write_byte(DECIMAL_POINT_GLYPH)?;
        }

        self.shown = Some(*readout);
        Ok(true)
    }
}

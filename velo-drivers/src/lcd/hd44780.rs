//! HD44780 character LCD, 4-bit write-only
//!
//! Drives the usual 16x2 module with six GPIOs: RS, E and D4-D7. R/W is
//! tied low, so the busy flag is never read and every command is followed
//! by a fixed delay instead.
//!
//! Only what the speed screen needs is implemented: initialisation, clear,
//! cursor positioning, CGRAM glyph upload and character writes.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use velo_display::{CharacterLcd, LcdError};

/// Clear display, cursor home
const CMD_CLEAR: u8 = 0x01;
/// Entry mode: increment, no shift
const CMD_ENTRY_MODE: u8 = 0x06;
/// Display on, cursor off, blink off
const CMD_DISPLAY_ON: u8 = 0x0C;
/// Function set: 4-bit bus, 2 lines, 5x8 font
const CMD_FUNCTION_SET: u8 = 0x28;
/// Set CGRAM address
const CMD_SET_CGRAM: u8 = 0x40;
/// Set DDRAM address
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first cell of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Number of CGRAM glyph slots
const CGRAM_SLOTS: u8 = 8;

/// Execution time of most instructions, with margin (µs)
const COMMAND_DELAY_US: u32 = 50;
/// Execution time of clear / home (µs)
const CLEAR_DELAY_US: u32 = 2_000;
/// Power-on settle time (ms)
const POWER_ON_DELAY_MS: u32 = 50;

/// HD44780 in 4-bit mode
///
/// All six pins share one type, which is what type-erased HAL outputs
/// (e.g. `embassy_rp::gpio::Output`) give you.
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    /// D4, D5, D6, D7
    data: [P; 4],
    delay: D,
    cols: u8,
    rows: u8,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Create a driver; call [`init`](Self::init) before use
    ///
    /// # Arguments
    /// - `rs`: Register select
    /// - `en`: Enable strobe
    /// - `data`: D4-D7, in that order
    /// - `delay`: Blocking delay provider
    /// - `cols`, `rows`: Module geometry (e.g. 16, 2)
    pub fn new(rs: P, en: P, data: [P; 4], delay: D, cols: u8, rows: u8) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
            cols,
            rows: rows.min(ROW_OFFSETS.len() as u8),
        }
    }

    /// Run the 4-bit initialisation sequence and clear the display
    pub fn init(&mut self) -> Result<(), LcdError> {
        self.delay.delay_ms(POWER_ON_DELAY_MS);
        self.rs.set_low().map_err(|_| LcdError::Pin)?;
        self.en.set_low().map_err(|_| LcdError::Pin)?;

        // Force 8-bit mode three times, whatever state the controller is in
        self.write_nibble(0x03)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);

        // Switch to 4-bit
        self.write_nibble(0x02)?;
        self.delay.delay_us(COMMAND_DELAY_US);

        self.command(CMD_FUNCTION_SET)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE)
    }

    /// Release pins and delay
    pub fn release(self) -> (P, P, [P; 4], D) {
        (self.rs, self.en, self.data, self.delay)
    }

    fn command(&mut self, command: u8) -> Result<(), LcdError> {
        self.send(command, false)?;
        self.delay.delay_us(COMMAND_DELAY_US);
        Ok(())
    }

    fn send(&mut self, byte: u8, data: bool) -> Result<(), LcdError> {
        if data {
            self.rs.set_high()
        } else {
            self.rs.set_low()
        }
        .map_err(|_| LcdError::Pin)?;

        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), LcdError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if nibble & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            }
            .map_err(|_| LcdError::Pin)?;
        }

        // Latched on the falling edge of E
        self.en.set_high().map_err(|_| LcdError::Pin)?;
        self.delay.delay_us(1);
        self.en.set_low().map_err(|_| LcdError::Pin)?;
        self.delay.delay_us(COMMAND_DELAY_US);
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> CharacterLcd for Hd44780<P, D> {
    fn create_char(&mut self, index: u8, rows: &[u8; 8]) -> Result<(), LcdError> {
        if index >= CGRAM_SLOTS {
            return Err(LcdError::InvalidGlyph);
        }

        self.command(CMD_SET_CGRAM | (index << 3))?;
        for &row in rows {
            self.send(row & 0x1F, true)?;
        }
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError> {
        if col >= self.cols || row >= self.rows {
            return Err(LcdError::InvalidPosition);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), LcdError> {
        self.send(byte, true)
    }

    fn clear(&mut self) -> Result<(), LcdError> {
        self.send(CMD_CLEAR, false)?;
        self.delay.delay_us(CLEAR_DELAY_US);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }
}

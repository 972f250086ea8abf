//! Character LCD trait
//!
//! Defines the interface the speed screen needs from a character display.

/// Character LCD errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Failed to drive a data or control pin
    Pin,
    /// Cursor position outside the display
    InvalidPosition,
    /// Custom glyph slot or big digit out of range
    InvalidGlyph,
}

/// Character LCD with custom glyph support
///
/// Modelled on HD44780 controllers: eight CGRAM slots of 5x8 pixels,
/// addressed as character codes 0-7.
pub trait CharacterLcd {
    /// Upload a custom 5x8 glyph into CGRAM slot `index` (0-7)
    ///
    /// Each byte is one pixel row, top first, low five bits used.
    fn create_char(&mut self, index: u8, rows: &[u8; 8]) -> Result<(), LcdError>;

    /// Move the cursor
    ///
    /// - `col`: Column (0-based)
    /// - `row`: Row (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError>;

    /// Write one character code at the cursor and advance it
    fn write_byte(&mut self, byte: u8) -> Result<(), LcdError>;

    /// Write ASCII text at the cursor
    fn print(&mut self, text: &str) -> Result<(), LcdError> {
        for byte in text.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Clear the display and home the cursor
    fn clear(&mut self) -> Result<(), LcdError>;

    /// Display size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);
}

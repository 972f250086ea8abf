//! Recording LCD for tests

use crate::backend::{CharacterLcd, LcdError};

pub const COLS: usize = 16;
pub const ROWS: usize = 2;

/// 16x2 LCD that records cell contents and uploaded glyphs
pub struct MockLcd {
    pub cells: [[u8; COLS]; ROWS],
    pub glyphs: [[u8; 8]; 8],
    pub writes: usize,
    col: usize,
    row: usize,
}

impl MockLcd {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            glyphs: [[0; 8]; 8],
            writes: 0,
            col: 0,
            row: 0,
        }
    }

    /// Row as text, custom glyph codes shown as their slot digit
    pub fn row_text(&self, row: usize) -> std::string::String {
        self.cells[row]
            .iter()
            .map(|&c| if c < 8 { char::from(b'0' + c) } else { char::from(c) })
            .collect()
    }
}

impl CharacterLcd for MockLcd {
    fn create_char(&mut self, index: u8, rows: &[u8; 8]) -> Result<(), LcdError> {
        let slot = self
            .glyphs
            .get_mut(index as usize)
            .ok_or(LcdError::InvalidGlyph)?;
        *slot = *rows;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError> {
        if col as usize >= COLS || row as usize >= ROWS {
            return Err(LcdError::InvalidPosition);
        }
        self.col = col as usize;
        self.row = row as usize;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), LcdError> {
        if self.col < COLS {
            self.cells[self.row][self.col] = byte;
        }
        self.col += 1;
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LcdError> {
        self.cells = [[b' '; COLS]; ROWS];
        self.col = 0;
        self.row = 0;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS as u8, ROWS as u8)
    }
}

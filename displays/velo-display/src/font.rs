//! Big-digit font
//!
//! Digits are drawn 3 cells wide and 2 rows tall from six custom glyphs
//! loaded into CGRAM slots 0-5. Cells that stay empty use an ASCII space.

use crate::backend::{CharacterLcd, LcdError};

/// Number of custom glyphs used by the font
pub const GLYPH_COUNT: usize = 6;

/// CGRAM slot holding the decimal point
pub const DECIMAL_POINT_GLYPH: u8 = 5;

/// Empty cell
const SPACE: u8 = b' ';

/// Index of the blank entry in [`BIG_DIGITS`]
pub const BLANK: u8 = 10;

/// Width of one big digit in cells
pub const DIGIT_WIDTH: u8 = 3;

/// Custom glyph bitmaps, one byte per pixel row
pub const SEGMENTS: [[u8; 8]; GLYPH_COUNT] = [
    // 0: top bar
    [
        0b11111, 0b11111, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000,
    ],
    // 1: bottom bar
    [
        0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111, 0b11111,
    ],
    // 2: full block
    [
        0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111,
    ],
    // 3: top and bottom bars
    [
        0b11111, 0b11111, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111, 0b11111,
    ],
    // 4: top half block
    [
        0b11111, 0b11111, 0b11111, 0b11111, 0b00000, 0b00000, 0b00000, 0b00000,
    ],
    // 5: decimal point
    [
        0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01110, 0b01110, 0b01110,
    ],
];

/// Glyph codes for digits 0-9 and blank: top row then bottom row
pub const BIG_DIGITS: [[u8; 6]; 11] = [
    [2, 0, 2, 2, 1, 2], // 0
    [0, 2, SPACE, 1, 2, 1], // 1
    [3, 3, 2, 2, 3, 3], // 2
    [0, 3, 2, 1, 3, 2], // 3
    [2, 1, 2, 0, 0, 2], // 4
    [2, 3, 3, 3, 3, 2], // 5
    [2, 3, 3, 2, 1, 2], // 6
    [4, 0, 2, SPACE, SPACE, 2], // 7
    [2, 3, 2, 2, 3, 2], // 8
    [2, 3, 2, SPACE, SPACE, 2], // 9
    [SPACE, SPACE, SPACE, SPACE, SPACE, SPACE], // blank
];

/// Upload the font glyphs into CGRAM slots 0-5
pub fn load_font<L: CharacterLcd>(lcd: &mut L) -> Result<(), LcdError> {
    for (index, rows) in SEGMENTS.iter().enumerate() {
        lcd.create_char(index as u8, rows)?;
    }
    Ok(())
}

/// Draw a big digit (0-9, or [`BLANK`]) with its top-left cell at `col`
pub fn print_big<L: CharacterLcd>(lcd: &mut L, col: u8, digit: u8) -> Result<(), LcdError> {
    let glyphs = BIG_DIGITS
        .get(digit as usize)
        .ok_or(LcdError::InvalidGlyph)?;

    for (row, cells) in glyphs.chunks(DIGIT_WIDTH as usize).enumerate() {
        lcd.set_cursor(col, row as u8)?;
        for &cell in cells {
            lcd.write_byte(cell)?;
        }
    }

    Ok(())
}

//! Character LCD abstraction and big-digit speed screen
//!
//! This crate provides:
//! - `CharacterLcd` trait for HD44780-style character displays
//! - The big-digit font: six custom 5x8 glyphs and an 11-entry digit table
//! - `SpeedScreen`, which lays a `SpeedReadout` out on a 16x2 display
//!
//! # Screen layout
//!
//! ```text
//!  col 0   4   8  12
//!     ┌───┬───┬───┬────┐
//!     │ T │ O │ D │    │  row 0
//!     │ T │ O.│ D │km/h│  row 1
//!     └───┴───┴───┴────┘
//! ```
//!
//! Each digit is three cells wide and two rows tall. The decimal point is
//! custom glyph 5 in the last cell of the ones digit's bottom row.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod font;
pub mod screen;

#[cfg(test)]
mod mock;

// Re-export key types
pub use backend::{CharacterLcd, LcdError};
pub use font::{load_font, print_big};
pub use screen::SpeedScreen;

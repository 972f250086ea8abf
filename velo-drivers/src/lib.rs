//! Hardware driver implementations
//!
//! This crate provides concrete implementations on top of the
//! embedded-hal traits for the bike computer's peripherals:
//!
//! - Hall sensor edge capture (embedded-hal-async `Wait`)
//! - HD44780 character LCD in 4-bit mode (embedded-hal `OutputPin`)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;
pub mod sensor;

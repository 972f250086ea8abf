//! Simple TOML parser for the bike configuration
//!
//! A minimal, allocation-free parser for the subset of TOML the bike
//! computer needs. The build script checks the embedded file with a full
//! TOML parser first.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float, boolean)
//! - [section] headers
//! - Underscore digit separators in integers (`40_000`)
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys or dotted section headers

use super::types::{BikeConfig, DisplayMode};
use crate::units::SpeedUnit;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value could not be parsed for its key
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Wheel,
    Hall,
    Display,
}

/// Parse TOML configuration into a BikeConfig
///
/// Keys missing from the input keep their defaults. Unknown keys are ignored.
pub fn parse_config(input: &str) -> Result<BikeConfig, ParseError> {
    let mut config = BikeConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_suffix(']')
                .or_else(|| strip_comment(line).strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(&header[1..])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

/// Parse a section header (without brackets)
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "wheel" => Ok(Section::Wheel),
        "hall" => Ok(Section::Hall),
        "display" => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an unsigned integer, allowing `_` separators between digits
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    if value.is_empty() || value.starts_with('_') || value.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: u32 = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
    }

    Ok(result)
}

/// Parse a float (integers are accepted too)
fn parse_f32(value: &str) -> Result<f32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse display mode
fn parse_mode(value: &str) -> Result<DisplayMode, ParseError> {
    match parse_string(value) {
        "speed" | "current_speed" => Ok(DisplayMode::CurrentSpeed),
        "distance" | "current_distance" => Ok(DisplayMode::CurrentDistance),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse speed unit
fn parse_unit(value: &str) -> Result<SpeedUnit, ParseError> {
    match parse_string(value) {
        "kmh" | "km/h" | "KMH" => Ok(SpeedUnit::Kmh),
        "mph" | "MPH" => Ok(SpeedUnit::Mph),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply a parsed value to the appropriate config field
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BikeConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Wheel => match key {
            "diameter_mm" => config.wheel.diameter_mm = parse_f32(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Hall => match key {
            "min_interval_us" => config.hall.min_interval_us = parse_u32(value)?,
            "max_interval_us" => config.hall.max_interval_us = parse_u32(value)?,
            "pull_up" => config.hall.pull_up = parse_bool(value)?,
            _ => {}
        },
        Section::Display => match key {
            "mode" => config.display.mode = parse_mode(value)?,
            "unit" => config.display.unit = parse_unit(value)?,
            _ => {}
        },
        Section::Root => {}
    }

    Ok(())
}

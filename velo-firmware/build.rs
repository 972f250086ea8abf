//! Build script for velo-firmware
//!
//! - Sets up linker search paths and arguments for memory.x
//! - Validates bike.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware's parser understands
const KNOWN_SECTIONS: [&str; 3] = ["wheel", "hall", "display"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate bike.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=bike.toml");

    let config_path = Path::new("bike.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: bike.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a bike.toml configuration file.             ║\n\
            ║  Please create one in the velo-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read bike.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in bike.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_wheel(&config, &mut errors);
    validate_hall(&config, &mut errors);
    validate_display(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in bike.toml                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=bike.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only flat `[wheel]`, `[hall]` and `[display]` tables are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !KNOWN_SECTIONS.contains(&name.as_str()) {
            errors.push(format!("Unknown section or root key '{}'", name));
            continue;
        }
        match value.as_table() {
            Some(table) => {
                for (key, value) in table {
                    if value.is_table() || value.is_array() {
                        errors.push(format!("[{}] {} must be a plain value", name, key));
                    }
                }
            }
            None => errors.push(format!("'{}' must be a [{}] section", name, name)),
        }
    }
}

/// Read a number that may be written as an integer or a float
fn as_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Validate wheel calibration
fn validate_wheel(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(diameter) = config.get("wheel").and_then(|w| w.get("diameter_mm")) else {
        return;
    };

    match as_number(diameter) {
        // Anything outside balance-bike to fat-bike sizes is a typo
        Some(mm) if (200.0..=1000.0).contains(&mm) => {}
        Some(_) => errors.push("[wheel] diameter_mm must be 200-1000".to_string()),
        None => errors.push("[wheel] diameter_mm must be a number".to_string()),
    }
}

/// Validate Hall sensor thresholds
fn validate_hall(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(hall) = config.get("hall") else {
        return;
    };

    let mut interval = |key: &str| match hall.get(key) {
        Some(toml::Value::Integer(us)) if (1..=u32::MAX as i64).contains(us) => Some(*us),
        Some(_) => {
            errors.push(format!("[hall] {} must be an integer 1-{}", key, u32::MAX));
            None
        }
        None => None,
    };

    let min = interval("min_interval_us");
    let max = interval("max_interval_us");

    if let (Some(min), Some(max)) = (min, max) {
        if min >= max {
            errors.push("[hall] min_interval_us must be below max_interval_us".to_string());
        }
    }

    if let Some(pull_up) = hall.get("pull_up") {
        if !pull_up.is_bool() {
            errors.push("[hall] pull_up must be true or false".to_string());
        }
    }
}

/// Validate display settings
fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };

    if let Some(mode) = display.get("mode") {
        if !matches!(
            mode.as_str(),
            Some("speed" | "current_speed" | "distance" | "current_distance")
        ) {
            errors.push("[display] mode must be 'speed' or 'distance'".to_string());
        }
    }

    if let Some(unit) = display.get("unit") {
        if !matches!(unit.as_str(), Some("kmh" | "km/h" | "KMH" | "mph" | "MPH")) {
            errors.push("[display] unit must be 'kmh' or 'mph'".to_string());
        }
    }
}

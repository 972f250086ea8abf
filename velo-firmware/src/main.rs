//! Velo - Bicycle Computer Firmware
//!
//! Main firmware binary for RP2040-based bike computers. A Hall sensor on
//! the fork sees one magnet per wheel revolution; speed and distance are
//! shown in big digits on a 16x2 HD44780 LCD.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use velo_core::config::{parse_config, BikeConfig, WheelConfig};
use velo_core::Speedometer;
use velo_drivers::lcd::Hd44780;
use velo_drivers::sensor::HallSensor;

use crate::clock::EmbassyClock;
use crate::shared::PULSE_CAPTURE;

/// Embedded configuration (compiled into firmware)
/// Edit bike.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../bike.toml");

/// LCD geometry
const LCD_COLS: u8 = 16;
const LCD_ROWS: u8 = 2;

mod clock;
mod shared;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Velo firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!("Configuration: {}", config);

    let speedometer = match Speedometer::from_config(&PULSE_CAPTURE, &config) {
        Ok(speedometer) => speedometer,
        Err(e) => {
            warn!("{}: diameter {} mm, using default", e, config.wheel.diameter_mm);
            let config = BikeConfig {
                wheel: WheelConfig::default(),
                ..config
            };
            unwrap!(Speedometer::from_config(&PULSE_CAPTURE, &config))
        }
    };
    info!(
        "Wheel: {} m per revolution",
        speedometer.calibration().circumference_m()
    );

    // Pin assignment is board-specific (Hall sensor: GPIO2)
    let pull = if config.hall.pull_up { Pull::Up } else { Pull::None };
    let hall = HallSensor::new(Input::new(p.PIN_2, pull), EmbassyClock);

    // Pin assignments are board-specific (LCD RS=GPIO16, E=GPIO17, D4-D7=GPIO18-21)
    let lcd = Hd44780::new(
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        [
            Output::new(p.PIN_18, Level::Low),
            Output::new(p.PIN_19, Level::Low),
            Output::new(p.PIN_20, Level::Low),
            Output::new(p.PIN_21, Level::Low),
        ],
        Delay,
        LCD_COLS,
        LCD_ROWS,
    );

    unwrap!(spawner.spawn(tasks::hall_task(hall, &PULSE_CAPTURE)));
    unwrap!(spawner.spawn(tasks::display_task(lcd, speedometer)));

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// Falls back to built-in defaults if bike.toml does not parse. build.rs
/// checks the file with a full TOML parser first, so this should not happen.
fn load_config() -> BikeConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            warn!("Failed to parse embedded config: {}", e);
            warn!("Using default configuration");
            BikeConfig::default()
        }
    }
}

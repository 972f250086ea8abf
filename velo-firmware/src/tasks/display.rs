//! Display task
//!
//! The polled half of the speedometer: zeroes the speed when the wheel goes
//! quiet, tracks top speed and redraws the big digits when they change.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Delay, Duration, Ticker};
use velo_core::traits::MicrosClock;
use velo_core::Speedometer;
use velo_display::{load_font, CharacterLcd, LcdError, SpeedScreen};
use velo_drivers::lcd::Hd44780;

use crate::clock::EmbassyClock;

/// Update and refresh interval in milliseconds
pub const REFRESH_INTERVAL_MS: u64 = 100;

/// LCD as wired on this board
pub type Lcd = Hd44780<Output<'static>, Delay>;

/// Bring up the LCD and upload the big-digit font
fn init_lcd(lcd: &mut Lcd) -> Result<(), LcdError> {
    lcd.init()?;
    load_font(lcd)?;
    lcd.clear()
}

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd, mut speedometer: Speedometer<'static>) {
    info!("Display task started");

    if let Err(e) = init_lcd(&mut lcd) {
        error!("LCD init failed: {:?}", e);
    }

    let clock = EmbassyClock;
    let mut screen = SpeedScreen::new();
    let mut ticker = Ticker::every(Duration::from_millis(REFRESH_INTERVAL_MS));

    loop {
        ticker.next().await;

        speedometer.update(clock.now_us());

        // Distance mode has no layout; leave the screen as it is
        let Some(readout) = speedometer.readout() else {
            continue;
        };

        match screen.render(&mut lcd, &readout) {
            Ok(true) => {
                debug!(
                    "Speed {} (top {} km/h, trip {} km)",
                    readout.to_text().as_str(),
                    speedometer.top_speed(),
                    speedometer.current_distance()
                );
            }
            Ok(false) => {}
            Err(e) => {
                warn!("LCD write failed: {:?}", e);
                // Redraw everything next tick
                screen.invalidate();
            }
        }
    }
}

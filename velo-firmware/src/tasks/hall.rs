//! Hall sensor task
//!
//! Waits for wheel edges and records them into the shared capture. Never
//! blocks between the edge and `record_pulse`.

use defmt::*;
use embassy_rp::gpio::Input;
use velo_core::{PulseCapture, PulseOutcome};
use velo_drivers::sensor::HallSensor;

use crate::clock::EmbassyClock;

/// Hall sensor as wired on this board
pub type HallInput = HallSensor<Input<'static>, EmbassyClock>;

/// Hall sensor task
#[embassy_executor::task]
pub async fn hall_task(mut sensor: HallInput, capture: &'static PulseCapture) {
    info!("Hall task started");

    loop {
        match sensor.capture_next(capture).await {
            Ok(PulseOutcome::Accepted { interval_us, rpm }) => {
                trace!("Pulse: {}us, {} rpm", interval_us, rpm);
            }
            Ok(PulseOutcome::Debounced { interval_us }) => {
                trace!("Bounce ignored: {}us", interval_us);
            }
            Err(e) => {
                warn!("Hall input error: {:?}", Debug2Format(&e));
            }
        }
    }
}

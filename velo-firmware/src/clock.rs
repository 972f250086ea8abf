//! Microsecond clock backed by the embassy time driver

use embassy_time::Instant;
use velo_core::traits::MicrosClock;

/// `embassy_time::Instant` truncated to a wrapping `u32` microsecond count
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_us(&self) -> u32 {
        // Wraps every ~71 minutes; interval math is wrapping
        Instant::now().as_micros() as u32
    }
}

//! Hall effect wheel sensor
//!
//! One magnet on the spoke, one rising edge per revolution. The driver
//! waits for the edge interrupt, stamps it with the microsecond clock and
//! hands the timestamp to a [`PulseCapture`].
//!
//! # Usage
//!
//! ```ignore
//! let mut hall = HallSensor::new(pin, clock);
//! loop {
//!     let outcome = hall.capture_next(&PULSE_CAPTURE).await?;
//! }
//! ```

use embedded_hal_async::digital::Wait;

use velo_core::traits::MicrosClock;
use velo_core::{PulseCapture, PulseOutcome};

/// Hall sensor on an edge-interrupt capable input
pub struct HallSensor<P, C> {
    pin: P,
    clock: C,
}

impl<P: Wait, C: MicrosClock> HallSensor<P, C> {
    /// Create a new Hall sensor driver
    ///
    /// # Arguments
    /// - `pin`: Input pin wired to the sensor output
    /// - `clock`: Microsecond clock shared with the speedometer
    pub fn new(pin: P, clock: C) -> Self {
        Self { pin, clock }
    }

    /// Wait for the next rising edge and return its timestamp (µs)
    pub async fn wait_for_pulse(&mut self) -> Result<u32, P::Error> {
        self.pin.wait_for_rising_edge().await?;
        Ok(self.clock.now_us())
    }

    /// Wait for the next rising edge and record it into `capture`
    pub async fn capture_next(&mut self, capture: &PulseCapture) -> Result<PulseOutcome, P::Error> {
        let now_us = self.wait_for_pulse().await?;
        Ok(capture.record_pulse(now_us))
    }

    /// Release the pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};
    use velo_core::Calibration;

    /// Pin whose edges arrive immediately
    struct MockPin {
        rising_edges: usize,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl Wait for MockPin {
        async fn wait_for_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        async fn wait_for_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
            self.rising_edges += 1;
            Ok(())
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Pin that fails every wait
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = PinFault;
    }

    impl Wait for BrokenPin {
        async fn wait_for_high(&mut self) -> Result<(), PinFault> {
            Err(PinFault)
        }

        async fn wait_for_low(&mut self) -> Result<(), PinFault> {
            Err(PinFault)
        }

        async fn wait_for_rising_edge(&mut self) -> Result<(), PinFault> {
            Err(PinFault)
        }

        async fn wait_for_falling_edge(&mut self) -> Result<(), PinFault> {
            Err(PinFault)
        }

        async fn wait_for_any_edge(&mut self) -> Result<(), PinFault> {
            Err(PinFault)
        }
    }

    /// Clock that advances by a fixed step on every read
    struct SteppingClock {
        now: Cell<u32>,
        step: u32,
    }

    impl MicrosClock for SteppingClock {
        fn now_us(&self) -> u32 {
            let now = self.now.get().wrapping_add(self.step);
            self.now.set(now);
            now
        }
    }

    #[test]
    fn test_wait_for_pulse_stamps_edge() {
        let clock = SteppingClock {
            now: Cell::new(0),
            step: 250_000,
        };
        let mut hall = HallSensor::new(MockPin { rising_edges: 0 }, clock);

        assert_eq!(block_on(hall.wait_for_pulse()), Ok(250_000));
        assert_eq!(block_on(hall.wait_for_pulse()), Ok(500_000));

        let (pin, _) = hall.release();
        assert_eq!(pin.rising_edges, 2);
    }

    #[test]
    fn test_capture_next_feeds_capture() {
        let capture = PulseCapture::new();
        capture.apply_calibration(&Calibration::from_diameter_mm(700.0).unwrap());
        capture.set_min_interval_us(40_000);

        let clock = SteppingClock {
            now: Cell::new(0),
            step: 300_000,
        };
        let mut hall = HallSensor::new(MockPin { rising_edges: 0 }, &clock);

        // First edge measures from boot
        assert_eq!(
            block_on(hall.capture_next(&capture)),
            Ok(PulseOutcome::Accepted {
                interval_us: 300_000,
                rpm: 200.0
            })
        );
        assert_eq!(
            block_on(hall.capture_next(&capture)),
            Ok(PulseOutcome::Accepted {
                interval_us: 300_000,
                rpm: 200.0
            })
        );
        assert_eq!(capture.last_pulse_us(), 600_000);
    }

    #[test]
    fn test_pin_error_propagates() {
        let capture = PulseCapture::new();
        let clock = SteppingClock {
            now: Cell::new(0),
            step: 1,
        };
        let mut hall = HallSensor::new(BrokenPin, clock);

        assert!(block_on(hall.capture_next(&capture)).is_err());
        assert_eq!(capture.last_pulse_us(), 0);
        assert_eq!(capture.total_distance_m(), 0.0);
    }
}

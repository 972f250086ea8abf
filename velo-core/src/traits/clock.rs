//! Monotonic microsecond clock

/// Free-running microsecond counter
///
/// The counter is allowed to wrap at `u32::MAX`; all interval arithmetic in
/// this crate uses wrapping subtraction.
pub trait MicrosClock {
    /// Current time in microseconds
    fn now_us(&self) -> u32;
}

impl<C: MicrosClock + ?Sized> MicrosClock for &C {
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }
}

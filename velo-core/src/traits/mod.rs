//! Hardware abstraction traits
//!
//! These traits define the interface between the measurement logic
//! and platform-specific implementations.

pub mod clock;

pub use clock::MicrosClock;

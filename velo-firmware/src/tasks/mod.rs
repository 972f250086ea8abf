//! Embassy async tasks
//!
//! The Hall task is the edge handler; the display task is the polled main
//! loop. They share only the static `PulseCapture`.

pub mod display;
pub mod hall;

pub use display::display_task;
pub use hall::hall_task;

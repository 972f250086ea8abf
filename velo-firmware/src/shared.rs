//! State shared between tasks
//!
//! The board has one Hall sensor, so there is exactly one capture. Tasks
//! get it as `&'static PulseCapture`; nothing below the firmware reaches
//! for this static directly.

use velo_core::PulseCapture;

/// Written by the Hall task, read by the display task
pub static PULSE_CAPTURE: PulseCapture = PulseCapture::new();

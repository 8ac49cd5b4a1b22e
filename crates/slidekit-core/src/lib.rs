//! Core runtime for slidekit.
//!
//! Widgets in this workspace are single-threaded and event driven. The
//! runtime owns the queue of frame callbacks that animations register and
//! tracks whether any observable state changed since the host last rendered.

mod frame_clock;
mod platform;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::RuntimeScheduler;
pub use runtime::{Runtime, RuntimeHandle};
pub use state::{MutableState, State};

/// Identifier handed out for every registered frame callback.
pub type FrameCallbackId = u64;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;

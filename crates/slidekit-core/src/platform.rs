//! Platform abstraction traits for runtime services.
//!
//! The host (a browser animation-frame loop, a test harness) decides when a
//! frame actually runs; the runtime only asks for one.

/// Receives frame requests from the runtime.
///
/// Implementations must be cheap to call: the runtime invokes
/// [`RuntimeScheduler::schedule_frame`] every time a frame callback is
/// registered or state is invalidated.
pub trait RuntimeScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

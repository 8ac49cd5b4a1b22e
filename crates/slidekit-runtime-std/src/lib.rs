//! Frame pump for hosts that own their frame loop.
//!
//! The browser adapter, the test robot and the benchmarks all run frames
//! themselves. [`StdRuntime`] gives them one place to be woken when the
//! slider wants a frame, and one call to run it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use slidekit_core::{Runtime, RuntimeHandle, RuntimeScheduler};

type FrameWaker = Rc<dyn Fn()>;

/// Counts frame requests and forwards each one to the host's waker.
#[derive(Default)]
pub struct StdScheduler {
    requests: Cell<u64>,
    waker: RefCell<Option<FrameWaker>>,
}

impl StdScheduler {
    /// Frames requested since creation.
    pub fn frame_requests(&self) -> u64 {
        self.requests.get()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.requests.set(self.requests.get() + 1);
        // Clone out so the waker may replace itself.
        let waker = self.waker.borrow().clone();
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("requests", &self.requests.get())
            .field("has_waker", &self.waker.borrow().is_some())
            .finish()
    }
}

/// A [`Runtime`] paired with the scheduler that wakes its host.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Rc<StdScheduler>,
    runtime: Runtime,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Rc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        Self { scheduler, runtime }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Called every time the slider needs a frame: a spring was started or
    /// the position moved. Replaces any earlier waker.
    pub fn set_frame_waker(&self, waker: impl Fn() + 'static) {
        *self.scheduler.waker.borrow_mut() = Some(Rc::new(waker));
    }

    pub fn clear_frame_waker(&self) {
        self.scheduler.waker.borrow_mut().take();
    }

    pub fn frame_requests(&self) -> u64 {
        self.scheduler.frame_requests()
    }

    /// Runs the frame callbacks due at `frame_time_nanos`.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.runtime.drain_frame_callbacks(frame_time_nanos);
    }

    /// Takes the pending render, if any. A host that draws outside of
    /// [`StdRuntime::run_frame`] calls this so later writes wake it again.
    pub fn take_render_request(&self) -> bool {
        self.runtime.take_render_request()
    }

    /// Runs one frame: drains the callbacks due at `frame_time_nanos`, then
    /// returns whether anything visible changed and needs drawing.
    pub fn run_frame(&self, frame_time_nanos: u64) -> bool {
        self.runtime.drain_frame_callbacks(frame_time_nanos);
        self.runtime.take_render_request()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;

use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct CountingScheduler {
    requests: Cell<usize>,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

fn runtime() -> (Runtime, Rc<CountingScheduler>) {
    let scheduler = Rc::new(CountingScheduler::default());
    (Runtime::new(scheduler.clone()), scheduler)
}

#[test]
fn frame_callback_runs_once_with_frame_time() {
    let (runtime, scheduler) = runtime();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let registration = {
        let seen = Rc::clone(&seen);
        runtime
            .frame_clock()
            .with_frame_nanos(move |time| seen.borrow_mut().push(time))
    };
    assert!(registration.is_active());
    assert_eq!(scheduler.requests.get(), 1);

    runtime.drain_frame_callbacks(16_000_000);
    runtime.drain_frame_callbacks(32_000_000);

    assert_eq!(seen.borrow().as_slice(), &[16_000_000]);
    assert!(!runtime.has_frame_callbacks());
    registration.disarm();
}

#[test]
fn dropping_registration_cancels_callback() {
    let (runtime, _) = runtime();
    let fired = Rc::new(Cell::new(false));

    {
        let fired = Rc::clone(&fired);
        let registration = runtime
            .frame_clock()
            .with_frame_nanos(move |_| fired.set(true));
        drop(registration);
    }

    assert!(!runtime.has_frame_callbacks());
    runtime.drain_frame_callbacks(1);
    assert!(!fired.get());
}

#[test]
fn callbacks_registered_during_drain_wait_for_next_frame() {
    let (runtime, _) = runtime();
    let handle = runtime.handle();
    let frames = Rc::new(RefCell::new(Vec::new()));

    {
        let frames = Rc::clone(&frames);
        let handle = handle.clone();
        handle.clone().register_frame_callback(move |first| {
            frames.borrow_mut().push(first);
            let frames = Rc::clone(&frames);
            handle.register_frame_callback(move |second| frames.borrow_mut().push(second));
        });
    }

    runtime.drain_frame_callbacks(10);
    assert_eq!(frames.borrow().as_slice(), &[10]);
    assert!(runtime.has_frame_callbacks());

    runtime.drain_frame_callbacks(20);
    assert_eq!(frames.borrow().as_slice(), &[10, 20]);
}

#[test]
fn state_writes_request_a_render() {
    let (runtime, scheduler) = runtime();
    let state = MutableState::with_runtime(0.0f32, runtime.handle());
    let view = state.as_state();

    state.set_value(12.5);
    state.set_value(13.5);

    assert_eq!(view.get(), 13.5);
    assert_eq!(scheduler.requests.get(), 1, "render request is coalesced");
    assert!(runtime.take_render_request());
    assert!(!runtime.take_render_request());
}

#[test]
fn taking_the_render_reopens_scheduling() {
    let (runtime, scheduler) = runtime();
    let state = MutableState::with_runtime(0, runtime.handle());

    for frame in 1..=3 {
        state.set_value(frame);
        state.set_value(frame * 10);
        assert_eq!(scheduler.requests.get(), frame as usize);
        assert!(runtime.take_render_request());
    }

    state.set_value(99);
    assert_eq!(scheduler.requests.get(), 4);
    assert!(!runtime.has_frame_callbacks(), "renders do not queue callbacks");
}

#[test]
fn handles_are_inert_after_runtime_drop() {
    let (runtime, _) = runtime();
    let handle = runtime.handle();
    drop(runtime);

    assert!(handle.register_frame_callback(|_| {}).is_none());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    handle.request_render();
}

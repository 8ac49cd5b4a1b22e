use super::*;

use slidekit_runtime_std::StdRuntime;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

fn pump(runtime: &StdRuntime, frame_time: &mut u64, max_frames: usize) {
    let runtime_handle = runtime.runtime();
    for _ in 0..max_frames {
        if !runtime_handle.has_frame_callbacks() {
            break;
        }
        *frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(*frame_time);
    }
}

#[test]
fn spring_moves_through_intermediate_values_and_lands_on_target() {
    let runtime = StdRuntime::new();
    let animatable = Animatable::new(0.0, runtime.runtime_handle());
    let state = animatable.state();
    let ended = Rc::new(Cell::new(None));

    {
        let ended = Rc::clone(&ended);
        animatable.animate_to_with_velocity(
            -300.0,
            SpringSpec::slider_settle(),
            0.0,
            move |end| ended.set(Some(end.value)),
        );
    }
    assert!(animatable.is_running());
    assert_eq!(state.get(), 0.0, "nothing moves before the first frame");

    let mut frame_time = 0u64;
    let mut saw_midpoint = false;
    for _ in 0..600 {
        if !animatable.is_running() {
            break;
        }
        frame_time += FRAME_NANOS;
        runtime.drain_frame_callbacks(frame_time);
        let value = state.get();
        if value < -1.0 && value > -299.0 {
            saw_midpoint = true;
        }
    }

    assert!(saw_midpoint, "spring should report intermediate values");
    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), -300.0);
    assert_eq!(animatable.velocity(), 0.0);
    assert_eq!(ended.get(), Some(-300.0));
}

#[test]
fn retarget_cancels_previous_run_without_notifying_it() {
    let runtime = StdRuntime::new();
    let animatable = Animatable::new(0.0, runtime.runtime_handle());
    let first_ended = Rc::new(Cell::new(false));
    let second_ended = Rc::new(Cell::new(false));

    {
        let first_ended = Rc::clone(&first_ended);
        animatable.animate_to_with_velocity(-300.0, SpringSpec::slider_settle(), 0.0, move |_| {
            first_ended.set(true)
        });
    }

    let mut frame_time = 0u64;
    pump(&runtime, &mut frame_time, 5);
    let mid_velocity = animatable.velocity();
    assert!(mid_velocity < 0.0);

    {
        let second_ended = Rc::clone(&second_ended);
        let spec = SpringSpec::slider_settle();
        animatable.animate_to_with_velocity(-600.0, spec, mid_velocity, move |_| {
            second_ended.set(true)
        });
    }
    pump(&runtime, &mut frame_time, 600);

    assert!(!first_ended.get());
    assert!(second_ended.get());
    assert_eq!(animatable.value(), -600.0);
}

#[test]
fn snap_and_stop_hold_the_value() {
    let runtime = StdRuntime::new();
    let animatable = Animatable::new(0.0, runtime.runtime_handle());
    let ended = Rc::new(Cell::new(false));
    {
        let ended = Rc::clone(&ended);
        animatable.animate_to_with_velocity(100.0, SpringSpec::default(), 0.0, move |_| {
            ended.set(true)
        });
    }

    let mut frame_time = 0u64;
    pump(&runtime, &mut frame_time, 4);
    animatable.stop();
    let frozen = animatable.value();
    assert!(!animatable.is_running());
    assert!(!runtime.runtime().has_frame_callbacks());

    pump(&runtime, &mut frame_time, 4);
    assert_eq!(animatable.value(), frozen);

    animatable.snap_to(42.0);
    assert_eq!(animatable.value(), 42.0);
    assert_eq!(animatable.state().get(), 42.0);
    pump(&runtime, &mut frame_time, 4);
    assert_eq!(animatable.value(), 42.0, "a snapped value is held");
    assert!(!ended.get());
}

#[test]
fn spring_already_at_rest_finishes_on_first_frame() {
    let runtime = StdRuntime::new();
    let animatable = Animatable::new(-300.0, runtime.runtime_handle());
    let ends = Rc::new(RefCell::new(Vec::new()));
    {
        let ends = Rc::clone(&ends);
        animatable.animate_to_with_velocity(-300.0, SpringSpec::slider_settle(), 0.0, move |end| {
            ends.borrow_mut().push(end.frame_time_nanos)
        });
    }

    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert_eq!(ends.borrow().as_slice(), &[FRAME_NANOS]);
    assert!(!animatable.is_running());
}

#[test]
fn end_listener_may_start_another_run() {
    let runtime = StdRuntime::new();
    let animatable = Animatable::new(0.0, runtime.runtime_handle());
    {
        let chained = animatable.clone();
        animatable.animate_to_with_velocity(0.0, SpringSpec::slider_settle(), 0.0, move |_| {
            chained.animate_to_with_velocity(50.0, SpringSpec::slider_settle(), 0.0, |_| {});
        });
    }

    runtime.drain_frame_callbacks(FRAME_NANOS);
    assert!(animatable.is_running());
    let mut frame_time = FRAME_NANOS;
    pump(&runtime, &mut frame_time, 600);
    assert_eq!(animatable.value(), 50.0);
}

#[test]
fn default_spring_is_the_over_damped_settle() {
    assert!(SpringSpec::slider_settle().damping_ratio() > 1.0);
    assert_eq!(SpringSpec::default(), SpringSpec::slider_settle());
}

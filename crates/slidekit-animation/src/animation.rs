use std::cell::RefCell;
use std::rc::Rc;

use slidekit_core::{FrameCallbackRegistration, MutableState, RuntimeHandle, State};

use crate::spring::{SpringMotion, SpringSpec};

/// How a spring run ended. Listeners only hear about runs that finished on
/// their own; a run that is retargeted, stopped or snapped is dropped
/// silently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationEnd {
    pub value: f32,
    pub frame_time_nanos: u64,
}

type EndListener = Box<dyn FnOnce(AnimationEnd) + 'static>;

/// A scalar that is either held at a value or driven by a spring.
///
/// Cloning shares the underlying value, so the widget and the frame callback
/// see the same state.
#[derive(Clone)]
pub struct Animatable {
    inner: Rc<RefCell<AnimatableInner>>,
}

struct AnimatableInner {
    state: MutableState<f32>,
    runtime: RuntimeHandle,
    current: f32,
    velocity: f32,
    target: f32,
    motion: Option<SpringMotion>,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<EndListener>,
}

impl AnimatableInner {
    fn cancel(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.motion = None;
        self.start_time_nanos = None;
        self.on_end = None;
    }
}

impl Animatable {
    pub fn new(initial: f32, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::with_runtime(initial, runtime.clone()),
            runtime,
            current: initial,
            velocity: 0.0,
            target: initial,
            motion: None,
            start_time_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Spring toward `target` starting at `initial_velocity` px/s. Any run in
    /// flight is cancelled first. `on_end` runs once, on the frame where the
    /// spring comes to rest.
    pub fn animate_to_with_velocity(
        &self,
        target: f32,
        spec: SpringSpec,
        initial_velocity: f32,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.cancel();
            log::trace!(
                "spring {} -> {} (v0 = {})",
                inner.current,
                target,
                initial_velocity
            );
            inner.target = target;
            inner.velocity = initial_velocity;
            inner.motion = Some(SpringMotion::new(
                spec,
                inner.current,
                target,
                initial_velocity,
            ));
            inner.on_end = Some(Box::new(on_end));
        }
        Self::schedule_frame(&self.inner);
    }

    /// Jump to `value` and hold it. Cancels any run in flight.
    pub fn snap_to(&self, value: f32) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel();
        inner.current = value;
        inner.target = value;
        inner.velocity = 0.0;
        inner.state.set_value(value);
    }

    /// Freeze at the current value. Cancels any run in flight.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel();
        inner.target = inner.current;
        inner.velocity = 0.0;
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    /// Velocity of the running spring in px/s; zero when held.
    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().motion.is_some()
    }

    pub fn state(&self) -> State<f32> {
        self.inner.borrow().state.as_state()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.frame_clock()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner>>, frame_time_nanos: u64) {
        let mut finished = None;
        let mut schedule_next = false;
        {
            let mut inner = this.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.disarm();
            }
            let Some(motion) = inner.motion else {
                return;
            };

            let start = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(start);
            let (displacement, velocity) = motion.sample(elapsed);

            if motion.spec().is_at_rest(displacement, velocity) {
                let target = inner.target;
                inner.current = target;
                inner.velocity = 0.0;
                inner.motion = None;
                inner.start_time_nanos = None;
                inner.state.set_value(target);
                finished = inner.on_end.take().map(|listener| {
                    (
                        listener,
                        AnimationEnd {
                            value: target,
                            frame_time_nanos,
                        },
                    )
                });
            } else {
                let value = inner.target + displacement;
                inner.current = value;
                inner.velocity = velocity;
                inner.state.set_value(value);
                schedule_next = true;
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        } else if let Some((listener, end)) = finished {
            // Runs outside the borrow so the listener may start a new run.
            listener(end);
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;

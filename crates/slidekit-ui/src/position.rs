//! The animated horizontal position of the slider track.

use slidekit_animation::{AnimationEnd, Animatable, SpringSpec};
use slidekit_core::{RuntimeHandle, State};

/// Single scalar driven either by the pointer or by a spring.
///
/// Every way of moving it first cancels the spring in flight, so there is
/// never more than one driver.
pub struct PositionDriver {
    value: Animatable,
    spring: SpringSpec,
    drag_origin: f32,
}

impl PositionDriver {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            value: Animatable::new(0.0, runtime),
            spring: SpringSpec::slider_settle(),
            drag_origin: 0.0,
        }
    }

    /// Hand the position to the pointer, freezing it where it is.
    pub fn begin_drag(&mut self) {
        self.value.stop();
        self.drag_origin = self.value.value();
    }

    /// Follow the pointer `total` px away from where the drag began.
    /// Unclamped: there is no resistance past the first or last slide.
    pub fn drag_by(&mut self, total: f32) {
        self.value.snap_to(self.drag_origin + total);
    }

    /// Spring onto `rest` after a release, seeded with the release velocity.
    pub fn settle(
        &self,
        rest: f32,
        velocity: f32,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.value
            .animate_to_with_velocity(rest, self.spring, velocity, on_end);
    }

    /// Spring onto a new `rest`, keeping the current velocity. Returns
    /// `false` without starting anything when the position is already
    /// resting there.
    pub fn retarget(&self, rest: f32, on_end: impl FnOnce(AnimationEnd) + 'static) -> bool {
        if !self.value.is_running() && self.value.value() == rest {
            return false;
        }
        let velocity = self.value.velocity();
        self.value
            .animate_to_with_velocity(rest, self.spring, velocity, on_end);
        true
    }

    /// Stop moving; the position stays where it is.
    pub fn halt(&self) {
        self.value.stop();
    }

    pub fn value(&self) -> f32 {
        self.value.value()
    }

    pub fn state(&self) -> State<f32> {
        self.value.state()
    }
}

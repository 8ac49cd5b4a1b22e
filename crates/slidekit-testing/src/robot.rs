//! Robot-style harness for driving a slider headlessly.
//!
//! The rule owns a [`StdRuntime`] and a virtual clock. Pointer gestures
//! advance the clock in small steps the way a real pointer would, and frames
//! are drained by hand, so spring motion is deterministic.
//!
//! # Example
//!
//! ```
//! use slidekit_testing::{SliderEvent, SliderTestRule};
//! use slidekit_ui::SliderProps;
//!
//! let props = SliderProps::new(vec!["a", "b", "c", "d", "e"])
//!     .with_slides_in_view(3)
//!     .with_slide_index(1);
//! let mut robot = SliderTestRule::new(props, 900.0).applying_index_requests();
//! robot.wait_for_idle();
//!
//! robot.drag_by(-50.0, 200.0, 100);
//! robot.wait_for_idle();
//! assert_eq!(robot.slide_index(), 2);
//! assert_eq!(robot.position(), -600.0);
//! assert!(robot.events().contains(&SliderEvent::NextSlide));
//! ```

use slidekit_foundation::{ClickEvent, Point, PointerEvent, PointerEventKind};
use slidekit_runtime_std::StdRuntime;
use slidekit_ui::{GesturePhase, Slider, SliderProps};

use crate::recorder::{EventRecorder, SliderEvent};

/// Length of one virtual frame.
pub const FRAME_MS: i64 = 16;

/// Interval between synthetic pointer moves.
const MOVE_STEP_MS: i64 = 8;

/// Frames [`SliderTestRule::wait_for_idle`] pumps before giving up.
const MAX_IDLE_FRAMES: usize = 600;

pub struct SliderTestRule<C> {
    runtime: StdRuntime,
    slider: Slider<C>,
    props: SliderProps<C>,
    recorder: EventRecorder,
    applies_index_requests: bool,
    applied_events: usize,
    renders: usize,
    now_ms: i64,
    pointer_x: f32,
}

impl<C: Clone> SliderTestRule<C> {
    /// Mount a slider with `props` in a container `container_width` px wide.
    /// Every callback is recorded; the originals in `props` still run.
    pub fn new(props: SliderProps<C>, container_width: f32) -> Self {
        let runtime = StdRuntime::new();
        let recorder = EventRecorder::new();
        let props = recorder.instrument(props);
        let mut slider = Slider::new(props.clone(), runtime.runtime_handle());
        slider.attach_container(container_width);

        Self {
            runtime,
            slider,
            props,
            recorder,
            applies_index_requests: false,
            applied_events: 0,
            renders: 0,
            now_ms: 0,
            pointer_x: container_width / 2.0,
        }
    }

    /// Act as the owning parent: apply every prev/next request to the slide
    /// index and pass the updated props back, as a controlled component's
    /// owner would.
    pub fn applying_index_requests(mut self) -> Self {
        self.applies_index_requests = true;
        self.applied_events = self.recorder.len();
        self
    }

    pub fn slider(&self) -> &Slider<C> {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut Slider<C> {
        &mut self.slider
    }

    pub fn runtime(&self) -> &StdRuntime {
        &self.runtime
    }

    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    pub fn events(&self) -> Vec<SliderEvent> {
        self.recorder.events()
    }

    pub fn take_events(&mut self) -> Vec<SliderEvent> {
        self.applied_events = 0;
        self.recorder.take()
    }

    pub fn position(&self) -> f32 {
        self.slider.position()
    }

    pub fn slide_index(&self) -> usize {
        self.slider.slide_index()
    }

    pub fn phase(&self) -> GesturePhase {
        self.slider.phase()
    }

    /// Frames drawn so far. Like a real host, the robot draws after every
    /// input and on every frame where something visible changed.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Re-render with new props, as the owner would.
    pub fn set_props(&mut self, props: SliderProps<C>) {
        self.props = self.recorder.instrument(props);
        self.slider.set_props(self.props.clone());
        self.apply_index_requests();
        self.draw();
    }

    /// Change only the slide index.
    pub fn set_slide_index(&mut self, slide_index: usize) {
        self.props = self.props.clone().with_slide_index(slide_index);
        self.slider.set_props(self.props.clone());
    }

    pub fn resize(&mut self, container_width: f32) {
        self.slider.on_resize(container_width);
        self.draw();
    }

    pub fn press(&mut self, x: f32) -> PointerEvent {
        self.pointer_x = x;
        self.dispatch(PointerEventKind::Down)
    }

    pub fn move_to(&mut self, x: f32) -> PointerEvent {
        self.pointer_x = x;
        self.dispatch(PointerEventKind::Move)
    }

    pub fn release(&mut self) -> PointerEvent {
        self.dispatch(PointerEventKind::Up)
    }

    pub fn cancel(&mut self) -> PointerEvent {
        self.dispatch(PointerEventKind::Cancel)
    }

    /// Let `ms` of virtual time pass without draining frames.
    pub fn idle_for(&mut self, ms: i64) {
        self.now_ms += ms;
    }

    /// Press mid-container, move `dx` px over `duration_ms` in even steps,
    /// hold still for `hold_ms`, then release.
    pub fn drag_by(&mut self, dx: f32, duration_ms: f32, hold_ms: i64) {
        let start = self.pointer_x;
        self.press(start);

        let duration = duration_ms.max(0.0) as i64;
        let steps = (duration / MOVE_STEP_MS).max(1);
        let step_ms = duration / steps;
        for step in 1..=steps {
            self.now_ms += step_ms;
            let progress = step as f32 / steps as f32;
            self.move_to(start + dx * progress);
        }

        self.now_ms += hold_ms;
        self.release();
        log::debug!("dragged {dx}px over {duration}ms, held {hold_ms}ms");
    }

    /// A quick drag released while still moving.
    pub fn flick(&mut self, dx: f32, duration_ms: f32) {
        self.drag_by(dx, duration_ms, 0);
    }

    /// Deliver a click through the slider's capture handler. Returns `true`
    /// when the click reached the slide content.
    pub fn click(&mut self, x: f32) -> bool {
        let event = ClickEvent::new(Point::new(x, 0.0));
        let swallowed = self.slider.on_click_capture(&event);
        !swallowed && !event.is_propagation_stopped()
    }

    /// Advance one frame: drain the frame callbacks due at it and draw if
    /// the position moved.
    pub fn advance_frame(&mut self) {
        self.now_ms += FRAME_MS;
        if self.runtime.run_frame(self.now_ms as u64 * 1_000_000) {
            self.renders += 1;
        }
        self.apply_index_requests();
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Pump frames until no frame callbacks remain. Returns the number of
    /// frames pumped.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.runtime().has_frame_callbacks() {
            if frames == MAX_IDLE_FRAMES {
                panic!("slider still animating after {MAX_IDLE_FRAMES} frames");
            }
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Positions sampled on every frame until idle, the way an observer of
    /// the position state would see them.
    pub fn record_positions_until_idle(&mut self) -> Vec<f32> {
        let mut positions = vec![self.position()];
        let mut frames = 0;
        while self.runtime.runtime().has_frame_callbacks() {
            if frames == MAX_IDLE_FRAMES {
                panic!("slider still animating after {MAX_IDLE_FRAMES} frames");
            }
            self.advance_frame();
            positions.push(self.position());
            frames += 1;
        }
        positions
    }

    fn dispatch(&mut self, kind: PointerEventKind) -> PointerEvent {
        let event = PointerEvent::new(kind, Point::new(self.pointer_x, 0.0))
            .with_uptime_ms(self.now_ms);
        self.slider.on_pointer_event(&event);
        self.apply_index_requests();
        self.draw();
        event
    }

    fn draw(&mut self) {
        self.runtime.take_render_request();
        let _ = self.slider.frame();
        self.renders += 1;
    }

    fn apply_index_requests(&mut self) {
        if !self.applies_index_requests {
            return;
        }
        let pending = self.recorder.since(self.applied_events);
        self.applied_events = self.recorder.len();

        let mut index = self.props.slide_index;
        for event in pending {
            match event {
                SliderEvent::NextSlide => index += 1,
                SliderEvent::PrevSlide => index = index.saturating_sub(1),
                _ => {}
            }
        }
        if index != self.props.slide_index {
            log::debug!("owner moves slide {} -> {index}", self.props.slide_index);
            self.set_slide_index(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_slides() -> SliderProps<usize> {
        SliderProps::new((0..5).collect())
            .with_slides_in_view(3)
            .with_slide_index(1)
    }

    #[test]
    fn frames_advance_virtual_time() {
        let mut robot = SliderTestRule::new(five_slides(), 900.0);
        assert_eq!(robot.now_ms(), 0);
        robot.advance_frames(3);
        assert_eq!(robot.now_ms(), 3 * FRAME_MS);
    }

    #[test]
    fn wait_for_idle_settles_the_mount_transition() {
        let mut robot = SliderTestRule::new(five_slides(), 900.0);
        let frames = robot.wait_for_idle();
        assert!(frames > 1);
        assert_eq!(robot.position(), -300.0);
        assert_eq!(robot.events(), vec![SliderEvent::TransitionEnd]);
    }

    #[test]
    fn settled_slider_still_wakes_the_host_on_later_input() {
        let props = SliderProps::new((0..4).collect()).with_slide_index(2);
        let mut robot = SliderTestRule::new(props, 100.0);
        robot.wait_for_idle();
        assert_eq!(robot.position(), -200.0);
        assert!(robot.render_count() > 1);
        assert!(!robot.runtime().take_render_request(), "every render was drawn");

        let before = robot.runtime().frame_requests();
        robot.press(50.0);
        robot.idle_for(8);
        robot.move_to(40.0);
        assert!(robot.runtime().frame_requests() > before);

        robot.idle_for(8);
        robot.move_to(30.0);
        robot.advance_frame();
        let after_first_drag = robot.runtime().frame_requests();
        robot.idle_for(8);
        robot.move_to(20.0);
        assert_eq!(robot.runtime().frame_requests(), after_first_drag + 1);
    }

    #[test]
    fn owner_applies_requests_only_when_asked() {
        let mut robot = SliderTestRule::new(five_slides(), 900.0);
        robot.wait_for_idle();
        robot.flick(-60.0, 40.0);
        robot.wait_for_idle();
        assert_eq!(robot.slide_index(), 1);

        let mut robot = SliderTestRule::new(five_slides(), 900.0).applying_index_requests();
        robot.wait_for_idle();
        robot.flick(-60.0, 40.0);
        robot.wait_for_idle();
        assert_eq!(robot.slide_index(), 2);
        assert_eq!(robot.position(), -600.0);
    }
}

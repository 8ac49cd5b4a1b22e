use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slidekit_animation::AnimationEnd;
use slidekit_core::{RuntimeHandle, State};
use slidekit_foundation::{ClickEvent, DragEvent, HorizontalDragDetector, PointerEvent};

use crate::gesture::{decide_release, GesturePhase, ReleaseDecision};
use crate::layout::{slide_padding, SlideLayout};
use crate::position::PositionDriver;
use crate::props::{SliderCallback, SliderProps};
use crate::render::{CursorStyle, SlideFrame, SliderFrame};

/// A horizontally draggable row of slides.
///
/// The host feeds it container measurements, pointer events and click
/// captures, and drains the runtime's frame callbacks to run the settle
/// spring. Dropping the slider cancels any spring in flight.
pub struct Slider<C> {
    props: SliderProps<C>,
    container_width: Option<f32>,
    layout: Option<SlideLayout>,
    driver: PositionDriver,
    drag: HorizontalDragDetector,
    phase: Rc<Cell<GesturePhase>>,
    on_transition_end: Rc<RefCell<SliderCallback>>,
    suppress_click: bool,
}

impl<C> Slider<C> {
    pub fn new(props: SliderProps<C>, runtime: RuntimeHandle) -> Self {
        let on_transition_end = Rc::new(RefCell::new(Rc::clone(&props.on_transition_end)));
        Self {
            props,
            container_width: None,
            layout: None,
            driver: PositionDriver::new(runtime),
            drag: HorizontalDragDetector::new(),
            phase: Rc::new(Cell::new(GesturePhase::Resting)),
            on_transition_end,
            suppress_click: false,
        }
    }

    /// The container element became available with `client_width`.
    pub fn attach_container(&mut self, client_width: f32) {
        self.container_width = Some(client_width);
        self.measure();
    }

    /// The container went away. Measurement is deferred until it returns;
    /// any drag or spring in flight is dropped where it is.
    pub fn detach_container(&mut self) {
        self.container_width = None;
        self.drag.reset();
        self.driver.halt();
        self.phase.set(GesturePhase::Resting);
    }

    pub fn is_attached(&self) -> bool {
        self.container_width.is_some()
    }

    /// The owner re-rendered the slider with new props.
    pub fn set_props(&mut self, props: SliderProps<C>) {
        *self.on_transition_end.borrow_mut() = Rc::clone(&props.on_transition_end);
        self.props = props;
        self.measure();
    }

    /// The window resized and the container now reports `client_width`.
    /// Ignored while no container is attached.
    pub fn on_resize(&mut self, client_width: f32) {
        if self.container_width.is_none() {
            log::trace!("resize before the container is attached; skipping");
            return;
        }
        self.container_width = Some(client_width);
        self.measure();
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) {
        match self.drag.on_pointer_event(event) {
            Some(DragEvent::Started { .. }) => self.begin_drag(event),
            Some(DragEvent::Moved { total }) => {
                self.driver.drag_by(total);
                event.consume();
            }
            Some(DragEvent::Ended { velocity, .. }) => self.end_drag(velocity),
            None => {}
        }
    }

    /// Capture-phase click handler. Returns `true` when the click was the
    /// synthetic one following a drag and has been swallowed.
    pub fn on_click_capture(&mut self, event: &ClickEvent) -> bool {
        if !self.suppress_click {
            return false;
        }
        self.suppress_click = false;
        event.stop_propagation();
        event.prevent_default();
        log::trace!("swallowed click after drag");
        true
    }

    pub fn props(&self) -> &SliderProps<C> {
        &self.props
    }

    pub fn slide_index(&self) -> usize {
        self.props.slide_index
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase.get()
    }

    pub fn layout(&self) -> Option<SlideLayout> {
        self.layout
    }

    /// Width of one slide; 0 until the first measurement.
    pub fn item_width(&self) -> f32 {
        self.layout.map_or(0.0, |layout| layout.item_width)
    }

    /// Distance a release must travel to change slide; 0 until the first
    /// measurement.
    pub fn distance_threshold(&self) -> f32 {
        self.layout.map_or(0.0, |layout| layout.distance_threshold())
    }

    /// Resting translation for the current index; 0 until the first
    /// measurement.
    pub fn offset(&self) -> f32 {
        self.layout.map_or(0.0, |layout| layout.offset)
    }

    /// Current on-screen translation of the track.
    pub fn position(&self) -> f32 {
        self.driver.value()
    }

    pub fn position_state(&self) -> State<f32> {
        self.driver.state()
    }

    pub fn is_click_suppressed(&self) -> bool {
        self.suppress_click
    }

    pub fn frame(&self) -> SliderFrame<'_, C> {
        let padding = slide_padding(self.props.gutter_width);
        let width = self.item_width();
        SliderFrame {
            translate_x: self.driver.value(),
            track_margin: -padding,
            cursor: CursorStyle::for_phase(self.phase.get()),
            slides: self
                .props
                .children
                .iter()
                .enumerate()
                .map(|(index, content)| SlideFrame {
                    index,
                    width,
                    padding,
                    content,
                })
                .collect(),
        }
    }

    fn measure(&mut self) {
        let Some(container_width) = self.container_width else {
            return;
        };
        let Some(layout) = SlideLayout::measure(
            container_width,
            self.props.slides_in_view,
            self.props.slide_index,
        ) else {
            return;
        };

        let offset_changed = self.layout.map_or(true, |previous| previous.offset != layout.offset);
        self.layout = Some(layout);
        if offset_changed {
            log::debug!(
                "slide {} rests at offset {} (item width {})",
                self.props.slide_index,
                layout.offset,
                layout.item_width
            );
            self.return_to_rest();
        }
    }

    /// Spring toward the resting position of the current index. A drag in
    /// progress keeps the pointer; its release settles on the new offset.
    fn return_to_rest(&mut self) {
        if self.phase.get() == GesturePhase::Dragging {
            return;
        }
        let rest = self.offset_rest();
        if self.driver.retarget(rest, self.transition_listener()) {
            self.phase.set(GesturePhase::Settling);
        }
    }

    fn begin_drag(&mut self, event: &PointerEvent) {
        event.prevent_default();
        self.driver.begin_drag();
        self.phase.set(GesturePhase::Dragging);
        self.suppress_click = false;
        log::trace!("drag started at {}", self.driver.value());
        (self.props.on_drag_start)();
    }

    fn end_drag(&mut self, velocity: f32) {
        let start = self.offset_rest();
        let distance = self.driver.value() - start;
        let decision = decide_release(distance, velocity, self.distance_threshold());
        log::debug!("drag released: distance {distance}, velocity {velocity} -> {decision:?}");

        if decision == ReleaseDecision::Untouched {
            self.phase.set(GesturePhase::Resting);
        } else {
            self.suppress_click = true;
            self.phase.set(GesturePhase::Settling);
            self.driver.settle(start, velocity, self.transition_listener());
            match decision {
                ReleaseDecision::Next => self.request_next_slide(),
                ReleaseDecision::Previous => self.request_previous_slide(),
                ReleaseDecision::Stay | ReleaseDecision::Untouched => {}
            }
        }

        (self.props.on_drag_end)();
    }

    fn request_next_slide(&self) {
        if self.props.can_advance() {
            (self.props.next_slide)();
        } else {
            log::debug!("already on the last slide; next request dropped");
        }
    }

    fn request_previous_slide(&self) {
        if self.props.can_retreat() {
            (self.props.prev_slide)();
        } else {
            log::debug!("already on the first slide; previous request dropped");
        }
    }

    fn offset_rest(&self) -> f32 {
        self.layout.map_or(0.0, |layout| layout.rest_position())
    }

    fn transition_listener(&self) -> impl FnOnce(AnimationEnd) + 'static {
        let phase = Rc::downgrade(&self.phase);
        let on_transition_end = Rc::clone(&self.on_transition_end);
        move |end| {
            let Some(phase) = phase.upgrade() else {
                return;
            };
            phase.set(GesturePhase::Resting);
            log::trace!("settled at {}", end.value);
            let callback = Rc::clone(&on_transition_end.borrow());
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidekit_foundation::{Point, PointerEventKind};
    use slidekit_runtime_std::StdRuntime;
    use std::cell::RefCell;

    const FRAME_NANOS: u64 = 16_666_667;

    fn settle(runtime: &StdRuntime, frame_time: &mut u64) {
        for _ in 0..600 {
            if !runtime.runtime().has_frame_callbacks() {
                return;
            }
            *frame_time += FRAME_NANOS;
            runtime.drain_frame_callbacks(*frame_time);
        }
        panic!("slider did not settle");
    }

    fn pointer(kind: PointerEventKind, x: f32, time_ms: i64) -> PointerEvent {
        PointerEvent::new(kind, Point::new(x, 0.0)).with_uptime_ms(time_ms)
    }

    #[test]
    fn measurement_waits_for_the_container() {
        let runtime = StdRuntime::new();
        let mut slider = Slider::new(
            SliderProps::new(vec![(); 5]).with_slides_in_view(3).with_slide_index(1),
            runtime.runtime_handle(),
        );
        assert_eq!(slider.layout(), None);
        slider.on_resize(900.0);
        assert_eq!(slider.layout(), None);

        slider.attach_container(900.0);
        assert_eq!(slider.item_width(), 300.0);
        assert_eq!(slider.offset(), 300.0);
        assert_eq!(slider.phase(), GesturePhase::Settling);
    }

    #[test]
    fn mount_springs_from_zero_to_the_initial_slide() {
        let runtime = StdRuntime::new();
        let ends = Rc::new(Cell::new(0));
        let props = {
            let ends = Rc::clone(&ends);
            SliderProps::new(vec![(); 5])
                .with_slides_in_view(3)
                .with_slide_index(2)
                .on_transition_end(move || ends.set(ends.get() + 1))
        };
        let mut slider = Slider::new(props, runtime.runtime_handle());
        slider.attach_container(900.0);

        let mut frame_time = 0;
        settle(&runtime, &mut frame_time);
        assert_eq!(slider.position(), -600.0);
        assert_eq!(slider.phase(), GesturePhase::Resting);
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn mount_on_first_slide_is_already_at_rest() {
        let runtime = StdRuntime::new();
        let ends = Rc::new(Cell::new(0));
        let props = {
            let ends = Rc::clone(&ends);
            SliderProps::new(vec![(); 3]).on_transition_end(move || ends.set(ends.get() + 1))
        };
        let mut slider = Slider::new(props, runtime.runtime_handle());
        slider.attach_container(400.0);

        assert_eq!(slider.phase(), GesturePhase::Resting);
        assert!(!runtime.runtime().has_frame_callbacks());
        assert_eq!(ends.get(), 0);
    }

    #[test]
    fn frame_reports_slide_geometry_and_cursor() {
        let runtime = StdRuntime::new();
        let mut slider = Slider::new(
            SliderProps::new(vec!["a", "b", "c", "d"])
                .with_slides_in_view(2)
                .with_gutter_width(16.0),
            runtime.runtime_handle(),
        );
        slider.attach_container(800.0);

        let frame = slider.frame();
        assert_eq!(frame.track_margin, -8.0);
        assert_eq!(frame.cursor, CursorStyle::Grab);
        assert_eq!(frame.slides.len(), 4);
        assert_eq!(frame.slides[3].content, &"d");
        assert!(frame.slides.iter().all(|slide| slide.width == 400.0 && slide.padding == 8.0));

        slider.on_pointer_event(&pointer(PointerEventKind::Down, 100.0, 0));
        assert_eq!(slider.frame().cursor, CursorStyle::Grabbing);
    }

    #[test]
    fn drag_start_prevents_default_and_clears_click_suppression() {
        let runtime = StdRuntime::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let props = {
            let log = Rc::clone(&log);
            SliderProps::new(vec![(); 3]).on_drag_start(move || log.borrow_mut().push("start"))
        };
        let mut slider = Slider::new(props, runtime.runtime_handle());
        slider.attach_container(300.0);

        slider.on_pointer_event(&pointer(PointerEventKind::Down, 100.0, 0));
        slider.on_pointer_event(&pointer(PointerEventKind::Move, 140.0, 10));
        slider.on_pointer_event(&pointer(PointerEventKind::Up, 140.0, 200));
        assert!(slider.is_click_suppressed());

        let press = pointer(PointerEventKind::Down, 100.0, 1_000);
        slider.on_pointer_event(&press);
        assert!(press.is_default_prevented());
        assert!(!slider.is_click_suppressed());
        assert_eq!(log.borrow().as_slice(), &["start", "start"]);
    }

    #[test]
    fn dropping_the_slider_cancels_its_spring() {
        let runtime = StdRuntime::new();
        let mut slider = Slider::new(
            SliderProps::new(vec![(); 4]).with_slide_index(3),
            runtime.runtime_handle(),
        );
        slider.attach_container(100.0);
        assert!(runtime.runtime().has_frame_callbacks());

        drop(slider);
        assert!(!runtime.runtime().has_frame_callbacks());
    }

    #[test]
    fn detach_freezes_and_defers_measurement() {
        let runtime = StdRuntime::new();
        let mut slider = Slider::new(
            SliderProps::new(vec![(); 4]).with_slide_index(3),
            runtime.runtime_handle(),
        );
        slider.attach_container(100.0);
        let mut frame_time = 0;
        for _ in 0..3 {
            frame_time += FRAME_NANOS;
            runtime.drain_frame_callbacks(frame_time);
        }

        slider.detach_container();
        let frozen = slider.position();
        assert!(!slider.is_attached());
        assert_eq!(slider.phase(), GesturePhase::Resting);
        assert!(!runtime.runtime().has_frame_callbacks());

        slider.set_props(SliderProps::new(vec![(); 4]).with_slide_index(1));
        assert_eq!(slider.position(), frozen);
        assert_eq!(slider.offset(), 300.0, "layout from before the detach is kept");
    }
}

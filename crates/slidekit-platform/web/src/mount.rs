use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slidekit_foundation::{ClickEvent, PointerEventKind};
use slidekit_runtime_std::StdRuntime;
use slidekit_ui::{Slider, SliderProps};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Window};

use crate::error::WebSliderError;
use crate::listener::EventListener;
use crate::{style, WebPlatform};

const POINTER_EVENTS: [&str; 4] = ["pointerdown", "pointermove", "pointerup", "pointercancel"];

/// Props or index changes requested while the slider was busy handling an
/// event; applied once it returns.
enum PendingUpdate {
    Props(SliderProps<Element>),
    SlideIndex(usize),
}

struct Shared {
    window: Window,
    container: HtmlElement,
    track: HtmlElement,
    slides: RefCell<Vec<HtmlElement>>,
    runtime: StdRuntime,
    slider: RefCell<Slider<Element>>,
    pending: RefCell<Vec<PendingUpdate>>,
    platform: WebPlatform,
    frame_loop: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    frame_request: Cell<Option<i32>>,
}

/// A slider mounted into a container element.
///
/// Slides are the `children` elements of the props; each is wrapped in a
/// slide element inside a track that is appended to the container.
/// Dropping the `WebSlider` removes every listener and stops the frame loop.
pub struct WebSlider {
    shared: Rc<Shared>,
    _listeners: Vec<EventListener>,
}

/// Weak handle for updating a mounted slider, safe to call from inside its
/// own callbacks.
#[derive(Clone)]
pub struct WebSliderHandle {
    shared: Weak<Shared>,
}

impl WebSlider {
    pub fn mount(
        container: HtmlElement,
        props: SliderProps<Element>,
    ) -> Result<Self, WebSliderError> {
        Self::mount_with(container, |_| props)
    }

    /// Mount with props built from a handle to the slider itself, so the
    /// `prev_slide` / `next_slide` callbacks can drive the index.
    pub fn mount_with(
        container: HtmlElement,
        build_props: impl FnOnce(WebSliderHandle) -> SliderProps<Element>,
    ) -> Result<Self, WebSliderError> {
        let window = web_sys::window().ok_or(WebSliderError::NoWindow)?;
        let document = window.document().ok_or(WebSliderError::NoDocument)?;
        let track = create_div(&document)?;
        style::apply_container(&container)?;
        style::apply_track(&track)?;
        container.append_child(&track)?;

        let runtime = StdRuntime::new();
        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let props = build_props(WebSliderHandle {
                shared: weak.clone(),
            });
            Shared {
                window,
                container,
                track,
                slides: RefCell::new(Vec::new()),
                slider: RefCell::new(Slider::new(props, runtime.runtime_handle())),
                runtime,
                pending: RefCell::new(Vec::new()),
                platform: WebPlatform::new(),
                frame_loop: RefCell::new(None),
                frame_request: Cell::new(None),
            }
        });

        Shared::start_frame_loop(&shared);
        {
            let slider = shared.slider.borrow();
            shared.rebuild_slides(&slider.props().children)?;
        }
        let listeners = Shared::listen(&shared)?;

        let width = shared.container_width();
        shared.slider.borrow_mut().attach_container(width);
        shared.runtime.take_render_request();
        shared.render()?;
        log::debug!("slider mounted at {width}px");

        Ok(Self {
            shared,
            _listeners: listeners,
        })
    }

    pub fn handle(&self) -> WebSliderHandle {
        WebSliderHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.shared.container
    }

    pub fn slide_index(&self) -> Option<usize> {
        self.shared
            .slider
            .try_borrow()
            .ok()
            .map(|slider| slider.slide_index())
    }

    pub fn set_props(&self, props: SliderProps<Element>) {
        self.shared.update(PendingUpdate::Props(props));
    }

    pub fn set_slide_index(&self, slide_index: usize) {
        self.shared.update(PendingUpdate::SlideIndex(slide_index));
    }
}

impl Drop for WebSlider {
    fn drop(&mut self) {
        self.shared.runtime.clear_frame_waker();
        if let Some(id) = self.shared.frame_request.take() {
            if let Err(err) = self.shared.window.cancel_animation_frame(id) {
                log::warn!("failed to cancel animation frame: {err:?}");
            }
        }
        if let Ok(mut slider) = self.shared.slider.try_borrow_mut() {
            slider.detach_container();
        }
        self.shared.track.remove();
        log::debug!("slider unmounted");
    }
}

impl WebSliderHandle {
    /// Returns `false` when the slider has been unmounted.
    pub fn set_props(&self, props: SliderProps<Element>) -> bool {
        self.with_shared(|shared| shared.update(PendingUpdate::Props(props)))
    }

    /// Returns `false` when the slider has been unmounted.
    pub fn set_slide_index(&self, slide_index: usize) -> bool {
        self.with_shared(|shared| shared.update(PendingUpdate::SlideIndex(slide_index)))
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.strong_count() > 0
    }

    fn with_shared(&self, f: impl FnOnce(&Shared)) -> bool {
        match self.shared.upgrade() {
            Some(shared) => {
                f(&shared);
                true
            }
            None => false,
        }
    }
}

impl Shared {
    fn container_width(&self) -> f32 {
        self.container.client_width() as f32
    }

    fn start_frame_loop(this: &Rc<Self>) {
        let weak = Rc::downgrade(this);
        let tick = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            if let Some(shared) = weak.upgrade() {
                shared.on_animation_frame(timestamp_ms);
            }
        }) as Box<dyn FnMut(f64)>);
        *this.frame_loop.borrow_mut() = Some(tick);

        let weak = Rc::downgrade(this);
        this.runtime.set_frame_waker(move || {
            if let Some(shared) = weak.upgrade() {
                shared.request_animation_frame();
            }
        });
    }

    fn request_animation_frame(&self) {
        if self.frame_request.get().is_some() {
            return;
        }
        let frame_loop = self.frame_loop.borrow();
        let Some(tick) = frame_loop.as_ref() else {
            return;
        };
        match self.window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(id) => self.frame_request.set(Some(id)),
            Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
        }
    }

    fn on_animation_frame(&self, timestamp_ms: f64) {
        self.frame_request.set(None);
        let moved = self.runtime.run_frame((timestamp_ms * 1_000_000.0) as u64);
        let applied = match self.apply_pending() {
            Ok(applied) => applied,
            Err(err) => {
                log::error!("failed to apply slider update: {err}");
                true
            }
        };
        if moved || applied {
            self.draw();
        }
    }

    fn listen(this: &Rc<Self>) -> Result<Vec<EventListener>, WebSliderError> {
        let mut listeners = Vec::with_capacity(POINTER_EVENTS.len() + 3);

        for event_type in POINTER_EVENTS {
            let weak = Rc::downgrade(this);
            listeners.push(EventListener::new(&this.container, event_type, move |event| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_pointer(event_type, &event);
                }
            })?);
        }

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new_capturing(&this.container, "click", move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_click_capture(&event);
            }
        })?);

        // Native image and link drags would steal the gesture.
        listeners.push(EventListener::new(&this.container, "dragstart", |event: Event| {
            event.prevent_default();
        })?);

        let weak = Rc::downgrade(this);
        listeners.push(EventListener::new(&this.window, "resize", move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.on_resize();
            }
        })?);

        Ok(listeners)
    }

    fn on_pointer(&self, event_type: &str, event: &Event) {
        let Some(kind) = self.platform.pointer_kind(event_type) else {
            return;
        };
        let Some(dom_event) = event.dyn_ref::<web_sys::PointerEvent>() else {
            return;
        };
        let pointer = self.platform.pointer_event(kind, dom_event);

        {
            let Ok(mut slider) = self.slider.try_borrow_mut() else {
                log::warn!("pointer event while the slider is busy; dropped");
                return;
            };
            slider.on_pointer_event(&pointer);
        }

        if pointer.is_default_prevented() {
            event.prevent_default();
        }
        if kind == PointerEventKind::Down {
            // Keep receiving moves once the pointer leaves the container.
            if let Err(err) = self.container.set_pointer_capture(dom_event.pointer_id()) {
                log::debug!("pointer capture unavailable: {err:?}");
            }
        }
        self.settle_event();
    }

    fn on_click_capture(&self, event: &Event) {
        let position = match event.dyn_ref::<MouseEvent>() {
            Some(mouse) => self
                .platform
                .pointer_position(mouse.client_x() as f64, mouse.client_y() as f64),
            None => Default::default(),
        };
        let click = ClickEvent::new(position);
        let swallowed = match self.slider.try_borrow_mut() {
            Ok(mut slider) => slider.on_click_capture(&click),
            Err(_) => false,
        };
        if swallowed {
            if click.is_propagation_stopped() {
                event.stop_propagation();
            }
            if click.is_default_prevented() {
                event.prevent_default();
            }
        }
    }

    fn on_resize(&self) {
        let width = self.container_width();
        match self.slider.try_borrow_mut() {
            Ok(mut slider) => slider.on_resize(width),
            Err(_) => {
                log::warn!("resize while the slider is busy; dropped");
                return;
            }
        }
        self.settle_event();
    }

    fn update(&self, update: PendingUpdate) {
        self.pending.borrow_mut().push(update);
        if self.slider.try_borrow_mut().is_ok() {
            self.settle_event();
        } else {
            log::trace!("slider busy; update queued");
        }
    }

    /// Apply queued updates, then draw. Runs at the end of every event.
    fn settle_event(&self) {
        if let Err(err) = self.apply_pending() {
            log::error!("failed to apply slider update: {err}");
        }
        self.draw();
    }

    /// Render unconditionally, consuming any render the runtime asked for.
    fn draw(&self) {
        self.runtime.take_render_request();
        if let Err(err) = self.render() {
            log::error!("failed to render slider: {err}");
        }
    }

    /// Returns whether any queued update was applied.
    fn apply_pending(&self) -> Result<bool, WebSliderError> {
        let mut applied = false;
        loop {
            let updates = std::mem::take(&mut *self.pending.borrow_mut());
            if updates.is_empty() {
                return Ok(applied);
            }
            let Ok(mut slider) = self.slider.try_borrow_mut() else {
                let mut pending = self.pending.borrow_mut();
                let newer = std::mem::replace(&mut *pending, updates);
                pending.extend(newer);
                return Ok(applied);
            };
            applied = true;
            for update in updates {
                let props = match update {
                    PendingUpdate::Props(props) => props,
                    PendingUpdate::SlideIndex(index) => {
                        slider.props().clone().with_slide_index(index)
                    }
                };
                if props.children != slider.props().children {
                    self.rebuild_slides(&props.children)?;
                }
                slider.set_props(props);
            }
        }
    }

    fn rebuild_slides(&self, children: &[Element]) -> Result<(), WebSliderError> {
        let document = self.window.document().ok_or(WebSliderError::NoDocument)?;
        let mut slides = self.slides.borrow_mut();
        for slide in slides.drain(..) {
            slide.remove();
        }
        for child in children {
            let slide = create_div(&document)?;
            slide.append_child(child)?;
            self.track.append_child(&slide)?;
            slides.push(slide);
        }
        log::trace!("built {} slides", slides.len());
        Ok(())
    }

    fn render(&self) -> Result<(), WebSliderError> {
        let Ok(slider) = self.slider.try_borrow() else {
            return Ok(());
        };
        let frame = slider.frame();
        style::apply_frame(&self.container, &self.track, &self.slides.borrow(), &frame)
    }
}

fn create_div(document: &Document) -> Result<HtmlElement, WebSliderError> {
    document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|element| WebSliderError::Dom(element.into()))
}

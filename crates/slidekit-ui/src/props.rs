use std::fmt;
use std::rc::Rc;

/// Informational autoplay interval carried in the props, in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 3_000;

pub type SliderCallback = Rc<dyn Fn()>;

pub fn noop_callback() -> SliderCallback {
    Rc::new(|| {})
}

/// Configuration handed to a [`Slider`](crate::Slider) by its owner.
///
/// `slide_index` is owned by the caller. The slider reports intents through
/// `prev_slide` / `next_slide` and expects the caller to pass back props with
/// the updated index.
pub struct SliderProps<C> {
    pub children: Vec<C>,
    pub slide_index: usize,
    pub slides_in_view: usize,
    /// Spacing between adjacent slides in px.
    pub gutter_width: f32,
    pub duration: u64,
    pub prev_slide: SliderCallback,
    pub next_slide: SliderCallback,
    pub on_drag_start: SliderCallback,
    pub on_drag_end: SliderCallback,
    pub on_transition_end: SliderCallback,
}

impl<C> SliderProps<C> {
    /// One slide per view, no gutter, every callback a no-op.
    pub fn new(children: Vec<C>) -> Self {
        Self {
            children,
            slide_index: 0,
            slides_in_view: 1,
            gutter_width: 0.0,
            duration: DEFAULT_DURATION_MS,
            prev_slide: noop_callback(),
            next_slide: noop_callback(),
            on_drag_start: noop_callback(),
            on_drag_end: noop_callback(),
            on_transition_end: noop_callback(),
        }
    }

    pub fn with_slide_index(mut self, slide_index: usize) -> Self {
        self.slide_index = slide_index;
        self
    }

    pub fn with_slides_in_view(mut self, slides_in_view: usize) -> Self {
        self.slides_in_view = slides_in_view;
        self
    }

    pub fn with_gutter_width(mut self, gutter_width: f32) -> Self {
        self.gutter_width = gutter_width;
        self
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    pub fn on_prev_slide(mut self, callback: impl Fn() + 'static) -> Self {
        self.prev_slide = Rc::new(callback);
        self
    }

    pub fn on_next_slide(mut self, callback: impl Fn() + 'static) -> Self {
        self.next_slide = Rc::new(callback);
        self
    }

    pub fn on_drag_start(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_drag_start = Rc::new(callback);
        self
    }

    pub fn on_drag_end(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_drag_end = Rc::new(callback);
        self
    }

    pub fn on_transition_end(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_transition_end = Rc::new(callback);
        self
    }

    pub fn item_count(&self) -> usize {
        self.children.len()
    }

    /// Highest index that still fills the view: `item_count - slides_in_view`,
    /// or 0 when there are fewer items than slots.
    pub fn last_slide_index(&self) -> usize {
        self.item_count().saturating_sub(self.slides_in_view)
    }

    pub fn can_advance(&self) -> bool {
        self.slide_index < self.last_slide_index()
    }

    pub fn can_retreat(&self) -> bool {
        self.slide_index > 0
    }
}

impl<C: Clone> Clone for SliderProps<C> {
    fn clone(&self) -> Self {
        Self {
            children: self.children.clone(),
            slide_index: self.slide_index,
            slides_in_view: self.slides_in_view,
            gutter_width: self.gutter_width,
            duration: self.duration,
            prev_slide: Rc::clone(&self.prev_slide),
            next_slide: Rc::clone(&self.next_slide),
            on_drag_start: Rc::clone(&self.on_drag_start),
            on_drag_end: Rc::clone(&self.on_drag_end),
            on_transition_end: Rc::clone(&self.on_transition_end),
        }
    }
}

impl<C> fmt::Debug for SliderProps<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderProps")
            .field("item_count", &self.item_count())
            .field("slide_index", &self.slide_index)
            .field("slides_in_view", &self.slides_in_view)
            .field("gutter_width", &self.gutter_width)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

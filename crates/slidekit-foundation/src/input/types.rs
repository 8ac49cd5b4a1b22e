use std::cell::Cell;
use std::rc::Rc;

use web_time::Instant;

pub type PointerId = u64;

/// A position in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);

    pub fn with(mut self, button: PointerButton) -> Self {
        self.0 |= 1 << (button as u8);
        self
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Decode the DOM `MouseEvent.buttons` bitmask (1 = primary,
    /// 2 = secondary, 4 = middle).
    pub fn from_dom_bits(bits: u16) -> Self {
        let mut buttons = Self::NONE;
        if bits & 1 != 0 {
            buttons = buttons.with(PointerButton::Primary);
        }
        if bits & 2 != 0 {
            buttons = buttons.with(PointerButton::Secondary);
        }
        if bits & 4 != 0 {
            buttons = buttons.with(PointerButton::Middle);
        }
        buttons
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

thread_local! {
    static INPUT_EPOCH: Instant = Instant::now();
}

/// Milliseconds since the first input event of this thread.
pub fn uptime_ms() -> i64 {
    INPUT_EPOCH.with(|epoch| epoch.elapsed().as_millis() as i64)
}

/// Pointer event with shared consumption flags.
///
/// Copies of an event share their flags, so a handler deep in the widget can
/// ask the platform layer to stop propagation or suppress the browser default.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub buttons: PointerButtons,
    /// Event time in milliseconds on a monotonic clock.
    pub uptime_ms: i64,
    consumed: Rc<Cell<bool>>,
    default_prevented: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            id: 0,
            kind,
            position,
            buttons: PointerButtons::NONE,
            uptime_ms: uptime_ms(),
            consumed: Rc::new(Cell::new(false)),
            default_prevented: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Override the timestamp, e.g. with the browser's `timeStamp`.
    pub fn with_uptime_ms(mut self, uptime_ms: i64) -> Self {
        self.uptime_ms = uptime_ms;
        self
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// A click delivered in the capture phase, before it reaches any slide.
#[derive(Clone, Debug, Default)]
pub struct ClickEvent {
    pub position: Point,
    stopped: Rc<Cell<bool>>,
    default_prevented: Rc<Cell<bool>>,
}

impl ClickEvent {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped.get()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

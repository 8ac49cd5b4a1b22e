//! Browser adapter for slidekit sliders.
//!
//! [`WebSlider::mount`] wraps a container element's slides in a draggable
//! track, wires pointer, click, drag and resize listeners, and drives the
//! settle spring from `requestAnimationFrame`. Everything is torn down when
//! the [`WebSlider`] is dropped.

mod error;
mod listener;
mod logging;
mod mount;
mod style;

pub use error::WebSliderError;
pub use listener::EventListener;
pub use logging::init_console_logging;
pub use mount::{WebSlider, WebSliderHandle};

use slidekit_foundation::{Point, PointerButtons, PointerEvent, PointerEventKind, PointerId};

/// Converts DOM input into slidekit events.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebPlatform;

impl WebPlatform {
    pub fn new() -> Self {
        Self
    }

    /// `client_x`/`client_y` are already CSS pixels; only deltas matter to
    /// the slider, so no origin is subtracted.
    pub fn pointer_position(&self, x: f64, y: f64) -> Point {
        Point::new(x as f32, y as f32)
    }

    pub fn pointer_kind(&self, event_type: &str) -> Option<PointerEventKind> {
        match event_type {
            "pointerdown" => Some(PointerEventKind::Down),
            "pointermove" => Some(PointerEventKind::Move),
            "pointerup" => Some(PointerEventKind::Up),
            "pointercancel" => Some(PointerEventKind::Cancel),
            _ => None,
        }
    }

    pub fn pointer_event(
        &self,
        kind: PointerEventKind,
        event: &web_sys::PointerEvent,
    ) -> PointerEvent {
        let position = self.pointer_position(event.client_x() as f64, event.client_y() as f64);
        PointerEvent::new(kind, position)
            .with_id(event.pointer_id() as PointerId)
            .with_buttons(PointerButtons::from_dom_bits(event.buttons()))
            .with_uptime_ms(event_time_ms(event.time_stamp()))
    }
}

/// DOM time stamps are fractional milliseconds; round to the nearest one so
/// samples a hair apart don't collapse onto the same truncated value.
fn event_time_ms(time_stamp: f64) -> i64 {
    time_stamp.round() as i64
}

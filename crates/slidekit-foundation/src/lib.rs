//! Pointer input, drag detection and velocity tracking for slidekit.

pub mod gesture_constants;
pub mod input;
pub mod velocity_tracker;

pub use input::{
    uptime_ms, ClickEvent, DragEvent, HorizontalDragDetector, Point, PointerButton,
    PointerButtons, PointerEvent, PointerEventKind, PointerId,
};
pub use velocity_tracker::VelocityTracker1D;

mod drag;
mod types;

pub use drag::{DragEvent, HorizontalDragDetector};
pub use types::{
    uptime_ms, ClickEvent, Point, PointerButton, PointerButtons, PointerEvent, PointerEventKind,
    PointerId,
};

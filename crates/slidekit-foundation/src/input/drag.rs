//! Horizontal drag recogniser.
//!
//! A drag starts on the primary pointer's press, with no touch slop: the
//! dragged value follows the pointer from the first move.

use crate::gesture_constants::MAX_FLING_VELOCITY;
use crate::input::types::{PointerButton, PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker1D;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// The pointer went down at `x`.
    Started { x: f32 },
    /// The pointer is `total` px from where it went down.
    Moved { total: f32 },
    /// The pointer was released (or the gesture cancelled) `total` px from
    /// where it went down, moving at `velocity` px/s.
    Ended { total: f32, velocity: f32 },
}

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    pointer: PointerId,
    origin_x: f32,
}

#[derive(Clone, Debug, Default)]
pub struct HorizontalDragDetector {
    active: Option<ActiveDrag>,
    tracker: VelocityTracker1D,
}

impl HorizontalDragDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Feed one pointer event; returns the drag transition it caused, if any.
    /// Events from pointers other than the one that started the drag are
    /// ignored until it ends.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        match (event.kind, self.active) {
            (PointerEventKind::Down, None) => {
                if !event.buttons.is_empty() && !event.buttons.contains(PointerButton::Primary) {
                    log::trace!("ignoring press without the primary button");
                    return None;
                }
                log::trace!("drag {} started at {}", event.id, event.position.x);
                self.tracker.reset();
                self.tracker.add_position(event.uptime_ms, event.position.x);
                self.active = Some(ActiveDrag {
                    pointer: event.id,
                    origin_x: event.position.x,
                });
                Some(DragEvent::Started {
                    x: event.position.x,
                })
            }
            (PointerEventKind::Move, Some(drag)) if drag.pointer == event.id => {
                self.tracker.add_position(event.uptime_ms, event.position.x);
                Some(DragEvent::Moved {
                    total: event.position.x - drag.origin_x,
                })
            }
            (PointerEventKind::Up | PointerEventKind::Cancel, Some(drag))
                if drag.pointer == event.id =>
            {
                self.tracker.add_position(event.uptime_ms, event.position.x);
                let velocity = self.tracker.velocity_capped(MAX_FLING_VELOCITY);
                self.active = None;
                self.tracker.reset();
                log::trace!(
                    "drag {} ended ({:?}) at {velocity} px/s",
                    drag.pointer,
                    event.kind
                );
                Some(DragEvent::Ended {
                    total: event.position.x - drag.origin_x,
                    velocity,
                })
            }
            _ => None,
        }
    }

    /// Abandon any drag in progress without reporting an end.
    pub fn reset(&mut self) {
        if let Some(drag) = self.active.take() {
            log::debug!("drag {} abandoned", drag.pointer);
        }
        self.tracker.reset();
    }
}

//! Draggable slider widget.
//!
//! A [`Slider`] lays a row of slides out at a fixed number per view, follows
//! the pointer while dragged, and on release springs onto a slide. It never
//! changes the slide index itself: it asks the owner through the
//! `prev_slide` / `next_slide` callbacks and picks up the new index from the
//! next [`Slider::set_props`].

mod gesture;
mod layout;
mod position;
mod props;
mod render;
mod slider;

pub use gesture::{decide_release, GesturePhase, ReleaseDecision};
pub use layout::{slide_padding, SlideLayout};
pub use position::PositionDriver;
pub use props::{noop_callback, SliderCallback, SliderProps, DEFAULT_DURATION_MS};
pub use render::{CursorStyle, SlideFrame, SliderFrame};
pub use slider::Slider;

pub use slidekit_animation::SpringSpec;
pub use slidekit_foundation::{ClickEvent, Point, PointerEvent, PointerEventKind};

//! Render snapshot handed to the platform layer.

use crate::gesture::GesturePhase;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Grab,
    Grabbing,
}

impl CursorStyle {
    pub fn for_phase(phase: GesturePhase) -> Self {
        match phase {
            GesturePhase::Dragging => CursorStyle::Grabbing,
            GesturePhase::Resting | GesturePhase::Settling => CursorStyle::Grab,
        }
    }

    pub fn css_value(&self) -> &'static str {
        match self {
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
        }
    }
}

/// One slide as it should be drawn.
#[derive(Debug, PartialEq)]
pub struct SlideFrame<'a, C> {
    pub index: usize,
    /// Outer width; slides never shrink below it.
    pub width: f32,
    /// Horizontal padding on each side.
    pub padding: f32,
    pub content: &'a C,
}

/// Everything needed to draw the slider for one frame.
#[derive(Debug, PartialEq)]
pub struct SliderFrame<'a, C> {
    /// Horizontal translation of the track.
    pub translate_x: f32,
    /// Margin on both ends of the track, pulling the outer slides' padding
    /// out to the container edges.
    pub track_margin: f32,
    pub cursor: CursorStyle,
    pub slides: Vec<SlideFrame<'a, C>>,
}

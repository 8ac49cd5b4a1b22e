//! Slide measurement.

use slidekit_foundation::gesture_constants::SLIDE_DISTANCE_FRACTION;

/// Geometry derived from the container width and the current slide index.
///
/// Never stored apart from the inputs it came from: the slider remeasures on
/// mount, on every props update and on resize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlideLayout {
    /// Width of one slide, gutter padding included.
    pub item_width: f32,
    /// Whole-pixel translation of the track at rest for the current index.
    pub offset: f32,
}

impl SlideLayout {
    /// `item_width = container_width / slides_in_view` and
    /// `offset = round(item_width * slide_index)`.
    ///
    /// Returns `None` when there is nothing sensible to measure: no slots in
    /// view, or a container width that is not a finite, non-negative number.
    pub fn measure(
        container_width: f32,
        slides_in_view: usize,
        slide_index: usize,
    ) -> Option<Self> {
        if slides_in_view == 0 {
            log::warn!("slider has no slides in view; skipping measurement");
            return None;
        }
        if !container_width.is_finite() || container_width < 0.0 {
            log::warn!(
                "slider container width {container_width} is unusable; skipping measurement"
            );
            return None;
        }

        let item_width = container_width / slides_in_view as f32;
        Some(Self {
            item_width,
            offset: (item_width * slide_index as f32).round(),
        })
    }

    /// Track translation at rest: the offset, leftwards.
    pub fn rest_position(&self) -> f32 {
        -self.offset
    }

    /// Distance a release must travel to change slide.
    pub fn distance_threshold(&self) -> f32 {
        SLIDE_DISTANCE_FRACTION * self.item_width
    }
}

/// Padding applied on each side of every slide. Adjacent slides each give
/// half of the gutter, so the gap between them is the full gutter.
pub fn slide_padding(gutter_width: f32) -> f32 {
    gutter_width / 2.0
}

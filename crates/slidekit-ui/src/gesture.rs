//! Release decision for a finished drag.

use slidekit_foundation::gesture_constants::SLIDE_VELOCITY_THRESHOLD;

/// Where the slider is in its drag lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    /// Held at the resting position of the current slide.
    Resting,
    /// Following the pointer one-to-one.
    Dragging,
    /// A spring is carrying the track to the resting position.
    Settling,
}

/// What a released drag asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// The track never left its resting position.
    Untouched,
    /// Moved, but not far or fast enough: spring back.
    Stay,
    Next,
    Previous,
}

/// Decide a release from the distance travelled relative to the resting
/// position and the velocity at release (both in px, px/s; negative is
/// leftwards). `threshold` is the distance that changes slide, normally
/// [`SlideLayout::distance_threshold`](crate::SlideLayout::distance_threshold).
///
/// Distance and velocity are independent: either one crossing its threshold
/// is enough. Leftward motion is checked first.
pub fn decide_release(distance: f32, velocity: f32, threshold: f32) -> ReleaseDecision {
    if distance == 0.0 {
        return ReleaseDecision::Untouched;
    }

    if distance < -threshold || velocity < -SLIDE_VELOCITY_THRESHOLD {
        ReleaseDecision::Next
    } else if distance > threshold || velocity > SLIDE_VELOCITY_THRESHOLD {
        ReleaseDecision::Previous
    } else {
        ReleaseDecision::Stay
    }
}

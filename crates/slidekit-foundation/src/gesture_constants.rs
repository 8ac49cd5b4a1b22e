//! Shared gesture constants.
//!
//! All values are in logical (CSS) pixels. They are fixed, not scaled by
//! density and not adapted at runtime.

/// Release speed, in px/s, above which a drag changes slide regardless of
/// how far it travelled.
pub const SLIDE_VELOCITY_THRESHOLD: f32 = 600.0;

/// Fraction of one item width a drag must travel to change slide.
pub const SLIDE_DISTANCE_FRACTION: f32 = 0.10;

/// Maximum release velocity in px/s reported by drag detection.
///
/// Matches Android's default maximum fling velocity on a baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

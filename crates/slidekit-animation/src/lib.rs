//! Animation system for slidekit.
//!
//! A single [`Animatable`] scalar driven by a damped mass-spring, ticked by
//! the runtime's frame clock.

mod animation;
mod spring;

pub use animation::{AnimationEnd, Animatable};
pub use spring::{SpringMotion, SpringSpec};

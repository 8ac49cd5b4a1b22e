//! Testing utilities and harness for slidekit

pub mod recorder;
pub mod robot;

pub use recorder::{EventRecorder, SliderEvent};
pub use robot::{SliderTestRule, FRAME_MS};

pub mod prelude {
    pub use crate::recorder::{EventRecorder, SliderEvent};
    pub use crate::robot::*;
}

//! Audio capture with cpal

pub mod buffer;
pub mod input;

pub use buffer::{FrameSource, SampleRing, SampleSink};
pub use input::{list_input_devices, AudioError, AudioInput};

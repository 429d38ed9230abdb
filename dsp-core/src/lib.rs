//! Luxbeam - Audio-Reactive Lighting DSP Core
//!
//! Turns live audio frames into normalized magnitude spectra and the
//! post-processed levels that drive lighting and visualization output.

pub mod audio;
pub mod processing;
pub mod spectrum;

pub use processing::{ProcessorConfig, SpectrumProcessor};
pub use spectrum::{AnalyzerConfig, SpectrumAnalyzer, SpectrumError, WindowType};

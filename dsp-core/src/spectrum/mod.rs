//! Spectral analysis with FFT

pub mod analysis;
pub mod fft;
pub mod window;

pub use analysis::{AnalyzerConfig, SpectrumAnalyzer};
pub use fft::{FftEngine, SpectrumError};
pub use window::{generate_window, WindowType};

//! High-level spectrum analyzer
//!
//! Combines windowing with the FFT engine to turn fixed-length audio frames
//! into one-sided magnitude spectra.

use super::fft::{FftEngine, SpectrumError};
use super::window::{generate_window, WindowType};

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// FFT size (number of samples, power of two)
    pub fft_size: usize,

    /// Window type applied before the transform
    pub window_type: WindowType,

    /// Sample rate in Hz, used only for bin frequency reporting
    pub sample_rate: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            window_type: WindowType::Hann,
            sample_rate: 44100.0,
        }
    }
}

/// Real-time spectrum analyzer
///
/// Holds the precomputed window and all transform scratch for a fixed frame
/// size. Input and output buffers are caller-owned and only borrowed for the
/// duration of one `analyze` call; the analyzer keeps no state between calls
/// beyond its reusable scratch, so identical inputs produce identical output.
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    engine: FftEngine,
    window: Vec<f64>,
    windowed: Vec<f64>,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    ///
    /// Fails if `config.fft_size` is not a power of two or is below 2.
    pub fn new(config: AnalyzerConfig) -> Result<Self, SpectrumError> {
        let engine = FftEngine::new(config.fft_size)?;
        let window = generate_window(config.window_type, config.fft_size);
        let windowed = vec![0.0; config.fft_size];

        Ok(Self {
            config,
            engine,
            window,
            windowed,
        })
    }

    /// Analyze one frame into a caller-owned magnitude buffer
    ///
    /// Applies the window, runs the forward transform and writes the
    /// normalized one-sided magnitude spectrum. Frequency increases with
    /// index, bin 0 = DC, bin i at `i * sample_rate / fft_size`.
    ///
    /// # Arguments
    /// * `input` - Time-domain samples, length must equal `fft_size`
    /// * `output` - Magnitude bins, length must equal `fft_size / 2`
    pub fn analyze(&mut self, input: &[f64], output: &mut [f64]) -> Result<(), SpectrumError> {
        if input.len() != self.config.fft_size {
            return Err(SpectrumError::InputLength {
                expected: self.config.fft_size,
                got: input.len(),
            });
        }

        for ((dst, &sample), &w) in self
            .windowed
            .iter_mut()
            .zip(input.iter())
            .zip(self.window.iter())
        {
            *dst = sample * w;
        }

        self.engine.process(&self.windowed, output)
    }

    /// Analyze one frame, allocating the output buffer
    pub fn analyze_to_vec(&mut self, input: &[f64]) -> Result<Vec<f64>, SpectrumError> {
        let mut output = vec![0.0; self.num_bins()];
        self.analyze(input, &mut output)?;
        Ok(output)
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Get frame size
    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Get number of output bins (fft_size / 2)
    pub fn num_bins(&self) -> usize {
        self.engine.num_bins()
    }

    /// Get the center frequency of a bin in Hz
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        self.engine.bin_to_hz(bin, self.config.sample_rate)
    }

    /// Get the frequency axis in Hz, one entry per output bin
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        (0..self.num_bins()).map(|i| self.bin_frequency(i)).collect()
    }
}

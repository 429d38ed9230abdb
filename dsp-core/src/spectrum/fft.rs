//! FFT engine using realfft for real-valued signals
//!
//! Optimized for repeated real-time analysis at a fixed transform size

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("FFT size must be a power of two, got {0}")]
    NotPowerOfTwo(usize),

    #[error("FFT size must be at least 2, got {0}")]
    SizeTooSmall(usize),

    #[error("input length {got} does not match FFT size {expected}")]
    InputLength { expected: usize, got: usize },

    #[error("output length {got} does not match bin count {expected}")]
    OutputLength { expected: usize, got: usize },
}

/// FFT engine for real-valued signals
///
/// Owns all scratch storage for a fixed transform size, so steady-state
/// processing allocates nothing. One in-flight call per engine; independent
/// engines may run on separate threads.
pub struct FftEngine {
    /// FFT size (number of samples, power of two)
    fft_size: usize,

    /// Real-to-complex FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable time-domain buffer (the transform consumes its input)
    scratch: Vec<f64>,

    /// Reusable coefficient buffer, fft_size/2 + 1 entries (DC..Nyquist)
    spectrum: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size, must be a power of two and at least 2
    pub fn new(fft_size: usize) -> Result<Self, SpectrumError> {
        if fft_size < 2 {
            return Err(SpectrumError::SizeTooSmall(fft_size));
        }
        if !fft_size.is_power_of_two() {
            return Err(SpectrumError::NotPowerOfTwo(fft_size));
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let scratch = vec![0.0; fft_size];
        let spectrum = vec![Complex::new(0.0, 0.0); fft_size / 2 + 1];

        Ok(Self {
            fft_size,
            r2c,
            scratch,
            spectrum,
        })
    }

    /// Compute the one-sided magnitude spectrum of a time-domain frame
    ///
    /// Writes `fft_size/2` magnitudes into `magnitudes`, bin 0 = DC, bin i
    /// at frequency `i * sample_rate / fft_size`. Each magnitude is
    /// `sqrt(re² + im²) * (2/N)`: the 2/N factor folds together the
    /// transform's unnormalized scaling and the one-sided doubling of
    /// energy split across positive and negative frequencies. The Nyquist
    /// coefficient delivered by the real-input transform falls outside the
    /// one-sided output and is discarded.
    ///
    /// # Arguments
    /// * `input` - Time-domain frame, length must equal `fft_size`
    /// * `magnitudes` - Output bins, length must equal `fft_size / 2`
    pub fn process(&mut self, input: &[f64], magnitudes: &mut [f64]) -> Result<(), SpectrumError> {
        if input.len() != self.fft_size {
            return Err(SpectrumError::InputLength {
                expected: self.fft_size,
                got: input.len(),
            });
        }
        if magnitudes.len() != self.num_bins() {
            return Err(SpectrumError::OutputLength {
                expected: self.num_bins(),
                got: magnitudes.len(),
            });
        }

        self.scratch.copy_from_slice(input);

        self.r2c
            .process(&mut self.scratch, &mut self.spectrum)
            .expect("FFT processing failed");

        let norm_factor = 2.0 / self.fft_size as f64;
        for (mag, coeff) in magnitudes.iter_mut().zip(self.spectrum.iter()) {
            *mag = coeff.norm() * norm_factor;
        }

        Ok(())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of output bins (fft_size/2, DC up to but excluding Nyquist)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Convert bin index to frequency in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }
}

//! Window functions for spectral analysis
//!
//! Tapers are generated in periodic ("DFT-even") form, denominator N rather
//! than N-1, which is the right convention when the windowed buffer feeds an
//! FFT. Windows are denormalized: peak 1.0, no amplitude compensation.

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/N)
    /// Sidelobe attenuation: ~31 dB, rolls off 18 dB/octave
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/N)
    /// Sidelobe attenuation: ~43 dB
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/N) + 0.08*cos(4πn/N)
    /// Sidelobe attenuation: ~58 dB
    Blackman,

    /// Rectangular window (no windowing)
    Rectangular,
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (N)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..N-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    let n = length as f64;
    let mut window = Vec::with_capacity(length);

    match window_type {
        WindowType::Hann => {
            for i in 0..length {
                let angle = 2.0 * PI * i as f64 / n;
                window.push(0.5 - 0.5 * angle.cos());
            }
        }

        WindowType::Hamming => {
            for i in 0..length {
                let angle = 2.0 * PI * i as f64 / n;
                window.push(0.54 - 0.46 * angle.cos());
            }
        }

        WindowType::Blackman => {
            for i in 0..length {
                let angle1 = 2.0 * PI * i as f64 / n;
                let angle2 = 4.0 * PI * i as f64 / n;
                window.push(0.42 - 0.5 * angle1.cos() + 0.08 * angle2.cos());
            }
        }

        WindowType::Rectangular => {
            window.resize(length, 1.0);
        }
    }

    window
}

/// Calculate window amplitude correction factor
///
/// Windowing reduces the signal amplitude; multiplying FFT magnitudes by
/// this factor restores calibrated peak levels. The analyzer itself applies
/// no correction, this is for callers that need absolute amplitudes.
pub fn window_correction_factor(window_type: WindowType, length: usize) -> f64 {
    let window = generate_window(window_type, length);
    let sum: f64 = window.iter().sum();
    length as f64 / sum
}

/// Calculate window power correction factor (for power spectral density)
pub fn window_power_correction_factor(window_type: WindowType, length: usize) -> f64 {
    let window = generate_window(window_type, length);
    let sum_sq: f64 = window.iter().map(|&w| w * w).sum();
    length as f64 / sum_sq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_hann_shape() {
        let n = 1024;
        let hann = generate_window(WindowType::Hann, n);

        assert_eq!(hann.len(), n);

        // Periodic form: exact zero at sample 0, peak 1.0 at N/2
        assert_eq!(hann[0], 0.0);
        assert!((hann[n / 2] - 1.0).abs() < 1e-12);

        // Symmetric about the peak: w[k] == w[N-k]
        for k in 1..n / 2 {
            assert!((hann[k] - hann[n - k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_window_generation() {
        let length = 256;

        let hamming = generate_window(WindowType::Hamming, length);
        let blackman = generate_window(WindowType::Blackman, length);

        assert_eq!(hamming.len(), length);
        assert_eq!(blackman.len(), length);

        // Hamming endpoints sit at 0.08, not zero
        assert!((hamming[0] - 0.08).abs() < 1e-12);

        // Peaks at center
        assert!((hamming[length / 2] - 1.0).abs() < 1e-12);
        assert!((blackman[length / 2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_rectangular_window() {
        let window = generate_window(WindowType::Rectangular, 100);
        assert_eq!(window.len(), 100);
        assert!(window.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_correction_factor() {
        let factor_rect = window_correction_factor(WindowType::Rectangular, 100);
        let factor_hann = window_correction_factor(WindowType::Hann, 100);

        // Rectangular window needs no correction
        assert!((factor_rect - 1.0).abs() < 1e-12);

        // Periodic Hann sums to N/2, so correction is exactly 2
        assert!((factor_hann - 2.0).abs() < 1e-9);
    }
}

//! Frame-to-spectrum processing pipeline
//!
//! Owns the analyzer plus the post-processing stages that turn raw magnitude
//! spectra into values fit for driving visual output: asymmetric smoothing,
//! decibel conversion with optional A-weighting, band averaging and frame
//! level metering.

use std::ops::RangeInclusive;

use super::smoothing::BiasedIirFilter;
use super::weighting::{apply_db_conversion, magnitude_to_db};
use crate::spectrum::{AnalyzerConfig, SpectrumAnalyzer, SpectrumError};

/// Spectrum processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Analyzer settings (frame size, window, sample rate)
    pub analyzer: AnalyzerConfig,

    /// Smooth bins across frames with the biased IIR filter
    pub use_smoothing: bool,

    /// Smoothing coefficient for rising bins
    pub upwards_alpha: f64,

    /// Smoothing coefficient for falling bins
    pub downwards_alpha: f64,

    /// Convert the processed spectrum to decibels
    pub convert_to_db: bool,

    /// Apply A-weighting during decibel conversion
    pub use_a_weighting: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            use_smoothing: true,
            upwards_alpha: 0.4,
            downwards_alpha: 0.7,
            convert_to_db: true,
            use_a_weighting: false,
        }
    }
}

/// Spectrum processing pipeline
///
/// `process` runs one frame through window/FFT/normalize, then smoothing and
/// decibel conversion as configured. Both the raw normalized magnitudes and
/// the processed spectrum are retained until the next frame, so consumers
/// can read whichever representation they need.
pub struct SpectrumProcessor {
    config: ProcessorConfig,
    analyzer: SpectrumAnalyzer,
    filter: BiasedIirFilter,

    /// Raw normalized magnitudes from the last frame
    magnitudes: Vec<f64>,

    /// Post-processed spectrum from the last frame
    processed: Vec<f64>,

    /// RMS level of the last frame
    rms: f64,
}

impl SpectrumProcessor {
    /// Create new spectrum processor
    pub fn new(config: ProcessorConfig) -> Result<Self, SpectrumError> {
        let analyzer = SpectrumAnalyzer::new(config.analyzer.clone())?;
        let num_bins = analyzer.num_bins();

        let mut filter = BiasedIirFilter::new(num_bins);
        filter.upwards_alpha = config.upwards_alpha;
        filter.downwards_alpha = config.downwards_alpha;

        Ok(Self {
            config,
            analyzer,
            filter,
            magnitudes: vec![0.0; num_bins],
            processed: vec![0.0; num_bins],
            rms: 0.0,
        })
    }

    /// Process one audio frame and return the processed spectrum
    ///
    /// # Arguments
    /// * `input` - Time-domain frame, length must equal the configured FFT size
    pub fn process(&mut self, input: &[f64]) -> Result<&[f64], SpectrumError> {
        self.analyzer.analyze(input, &mut self.magnitudes)?;

        self.rms = (input.iter().map(|&x| x * x).sum::<f64>() / input.len() as f64).sqrt();

        self.processed.copy_from_slice(&self.magnitudes);

        if self.config.use_smoothing {
            self.filter.apply_inplace(&mut self.processed);
        }

        if self.config.convert_to_db {
            let bin_width = self.config.analyzer.sample_rate / self.config.analyzer.fft_size as f64;
            apply_db_conversion(&mut self.processed, bin_width, self.config.use_a_weighting);
        }

        Ok(&self.processed)
    }

    /// Raw normalized magnitudes of the last processed frame
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Processed spectrum of the last frame (smoothed and/or in dB)
    pub fn spectrum(&self) -> &[f64] {
        &self.processed
    }

    /// RMS level of the last frame
    pub fn rms(&self) -> f64 {
        self.rms
    }

    /// Overall level of the last frame in decibels
    pub fn amplitude_db(&self) -> f64 {
        magnitude_to_db(self.rms)
    }

    /// Average raw magnitude over an inclusive bin range
    ///
    /// With a non-zero `falloff`, up to that many bins on each side of the
    /// range also contribute, weighted linearly down to zero with distance.
    /// Out-of-range bin indices are clamped away rather than wrapped.
    pub fn band_average(&self, range: RangeInclusive<usize>, falloff: usize) -> f64 {
        let lo = *range.start();
        let hi = (*range.end()).min(self.magnitudes.len() - 1);
        if lo > hi {
            return 0.0;
        }

        let mut sum: f64 = self.magnitudes[lo..=hi].iter().sum();
        let mut denom = (hi - lo + 1) as f64;

        if falloff > 0 {
            let df = 1.0 / (falloff as f64 + 1.0);
            let mut factor = 1.0;

            for i in 1..=falloff {
                factor -= df;
                if let Some(below) = lo.checked_sub(i) {
                    sum += self.magnitudes[below] * factor;
                    denom += factor;
                }
                if hi + i < self.magnitudes.len() {
                    sum += self.magnitudes[hi + i] * factor;
                    denom += factor;
                }
            }
        }

        sum / denom
    }

    /// Number of spectrum bins
    pub fn num_bins(&self) -> usize {
        self.analyzer.num_bins()
    }

    /// The underlying analyzer
    pub fn analyzer(&self) -> &SpectrumAnalyzer {
        &self.analyzer
    }

    /// Get current configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Clear smoothing history and held spectra
    pub fn reset(&mut self) {
        self.filter.reset();
        self.magnitudes.fill(0.0);
        self.processed.fill(0.0);
        self.rms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::WindowType;
    use std::f64::consts::PI;

    fn config(fft_size: usize) -> ProcessorConfig {
        ProcessorConfig {
            analyzer: AnalyzerConfig {
                fft_size,
                window_type: WindowType::Hann,
                sample_rate: 44100.0,
            },
            ..ProcessorConfig::default()
        }
    }

    fn sine_frame(freq_hz: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|n| (2.0 * PI * freq_hz * n as f64 / 44100.0).sin())
            .collect()
    }

    #[test]
    fn test_raw_pipeline_matches_analyzer() {
        let mut cfg = config(1024);
        cfg.use_smoothing = false;
        cfg.convert_to_db = false;

        let mut processor = SpectrumProcessor::new(cfg).unwrap();
        let mut analyzer = SpectrumAnalyzer::new(config(1024).analyzer).unwrap();

        let frame = sine_frame(440.0, 1024);
        let processed = processor.process(&frame).unwrap().to_vec();
        let direct = analyzer.analyze_to_vec(&frame).unwrap();

        assert_eq!(processed, direct);
        assert_eq!(processor.magnitudes(), direct.as_slice());
    }

    #[test]
    fn test_db_output_is_negative_for_quiet_input() {
        let mut cfg = config(1024);
        cfg.use_smoothing = false;

        let mut processor = SpectrumProcessor::new(cfg).unwrap();
        let frame: Vec<f64> = sine_frame(440.0, 1024).iter().map(|&x| x * 0.01).collect();
        let spectrum = processor.process(&frame).unwrap();

        // A -40 dBFS tone has no bins above 0 dB
        assert!(spectrum.iter().all(|&db| db < 0.0));
        assert_eq!(spectrum.len(), 512);
    }

    #[test]
    fn test_smoothing_holds_decaying_bins() {
        let mut cfg = config(1024);
        cfg.convert_to_db = false;

        let mut processor = SpectrumProcessor::new(cfg).unwrap();

        let frame = sine_frame(440.0, 1024);
        processor.process(&frame).unwrap();
        let held = processor.spectrum()[10];

        // Tone stops, smoothed bin decays instead of dropping to zero
        processor.process(&vec![0.0; 1024]).unwrap();
        let decayed = processor.spectrum()[10];

        assert!(decayed > 0.0);
        assert!(decayed < held);
    }

    #[test]
    fn test_band_average_flat_spectrum() {
        let mut cfg = config(8);
        cfg.use_smoothing = false;
        cfg.convert_to_db = false;

        let mut processor = SpectrumProcessor::new(cfg).unwrap();

        // Centered impulse gives a flat 0.25 spectrum, so every band
        // averages to 0.25 regardless of falloff
        let mut frame = vec![0.0; 8];
        frame[4] = 1.0;
        processor.process(&frame).unwrap();

        assert!((processor.band_average(0..=3, 0) - 0.25).abs() < 1e-12);
        assert!((processor.band_average(1..=2, 1) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_band_average_falloff_weights() {
        let mut cfg = config(8);
        cfg.use_smoothing = false;
        cfg.convert_to_db = false;

        let mut processor = SpectrumProcessor::new(cfg).unwrap();
        processor.magnitudes = vec![0.0, 1.0, 0.0, 0.0];

        // Band {1} alone averages 1.0; widening with falloff pulls in the
        // zero neighbors at half weight: 1 / (1 + 2*0.5) = 0.5
        assert!((processor.band_average(1..=1, 0) - 1.0).abs() < 1e-12);
        assert!((processor.band_average(1..=1, 1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_amplitude_db_tracks_level() {
        let mut processor = SpectrumProcessor::new(config(1024)).unwrap();

        processor.process(&sine_frame(440.0, 1024)).unwrap();
        let loud = processor.amplitude_db();

        let quiet_frame: Vec<f64> = sine_frame(440.0, 1024).iter().map(|&x| x * 0.1).collect();
        processor.process(&quiet_frame).unwrap();
        let quiet = processor.amplitude_db();

        // A factor of 10 in amplitude is 20 dB
        assert!((loud - quiet - 20.0).abs() < 0.1);

        // Unit sine RMS is 1/sqrt(2)
        processor.process(&sine_frame(440.0, 1024)).unwrap();
        assert!((processor.rms() - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.01);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut cfg = config(1024);
        cfg.convert_to_db = false;

        let mut processor = SpectrumProcessor::new(cfg).unwrap();
        let frame = sine_frame(440.0, 1024);

        let first = processor.process(&frame).unwrap().to_vec();
        processor.process(&frame).unwrap();
        processor.reset();
        let after_reset = processor.process(&frame).unwrap().to_vec();

        // Identical history after a reset means identical output
        assert_eq!(first, after_reset);
    }

    #[test]
    fn test_rejects_wrong_frame_length() {
        let mut processor = SpectrumProcessor::new(config(1024)).unwrap();
        assert!(processor.process(&vec![0.0; 512]).is_err());
    }
}

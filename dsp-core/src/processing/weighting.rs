//! Decibel conversion and A-weighting
//!
//! Magnitudes are converted with 20*log10 and optionally shifted by the
//! standard A-weighting curve, interpolated from the tabulated third-octave
//! values between 10 Hz and 20 kHz.

const A_WEIGHT_FREQUENCY: [f64; 34] = [
    10.0, 12.5, 16.0, 20.0, 25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0,
    315.0, 400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0,
    5000.0, 6300.0, 8000.0, 10000.0, 12500.0, 16000.0, 20000.0,
];

const A_WEIGHT_DECIBELS: [f64; 34] = [
    -70.4, -63.4, -56.7, -50.5, -44.7, -39.4, -34.6, -30.2, -26.2, -22.5, -19.1, -16.1, -13.4,
    -10.9, -8.6, -6.6, -4.8, -3.2, -1.9, -0.8, 0.0, 0.6, 1.0, 1.2, 1.3, 1.2, 1.0, 0.5, -0.1, -1.1,
    -2.5, -4.3, -6.6, -9.3,
];

/// Floor applied before taking the log, keeps silence finite
const DB_FLOOR: f64 = 1e-10;

/// Convert a normalized magnitude to decibels
pub fn magnitude_to_db(value: f64) -> f64 {
    20.0 * value.max(DB_FLOOR).log10()
}

/// A-weighting offset in dB for the given frequency
///
/// Linearly interpolated between table points, clamped to the end values
/// below 10 Hz and above 20 kHz.
pub fn a_weight_offset_db(freq: f64) -> f64 {
    let last = A_WEIGHT_FREQUENCY.len() - 1;
    if freq <= A_WEIGHT_FREQUENCY[0] {
        return A_WEIGHT_DECIBELS[0];
    }
    if freq >= A_WEIGHT_FREQUENCY[last] {
        return A_WEIGHT_DECIBELS[last];
    }

    for i in 1..A_WEIGHT_FREQUENCY.len() {
        if A_WEIGHT_FREQUENCY[i] > freq {
            let f0 = A_WEIGHT_FREQUENCY[i - 1];
            let f1 = A_WEIGHT_FREQUENCY[i];
            let d0 = A_WEIGHT_DECIBELS[i - 1];
            let d1 = A_WEIGHT_DECIBELS[i];
            return d0 + (freq - f0) * (d1 - d0) / (f1 - f0);
        }
    }

    unreachable!("frequency {freq} not bracketed by A-weighting table");
}

/// Convert a magnitude spectrum to decibels in place
///
/// # Arguments
/// * `spectrum` - Normalized magnitudes, converted in place
/// * `bin_width_hz` - Frequency step between bins (sample_rate / fft_size)
/// * `a_weighting` - Also apply the A-weighting offset per bin
pub fn apply_db_conversion(spectrum: &mut [f64], bin_width_hz: f64, a_weighting: bool) {
    for (i, value) in spectrum.iter_mut().enumerate() {
        *value = magnitude_to_db(*value);
        if a_weighting {
            *value += a_weight_offset_db(i as f64 * bin_width_hz);
        }
    }
}

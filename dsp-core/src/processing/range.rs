//! Level remapping and adaptive range tracking
//!
//! Levels coming out of the spectrum pipeline live in unpredictable ranges
//! that drift with source material. `DynamicRange` tracks a slowly adapting
//! min/max envelope so downstream consumers can normalize against it, and
//! the remap helpers do the clamped linear rescaling.

use super::smoothing::BiasedIirFilter;

const ALPHA_MAX: f64 = 0.9995;
const ALPHA_MIN: f64 = 0.995;

/// Remap a value from min..max into 0..1, clamping outside the range
pub fn remap_to_unit(value: f64, min: f64, max: f64) -> f64 {
    if value > max {
        return 1.0;
    }
    if value < min {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// Remap a value between arbitrary ranges, clamping at the output bounds
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if value >= in_max {
        return out_max;
    }
    if value <= in_min {
        return out_min;
    }
    let scale = (out_max - out_min) / (in_max - in_min);
    out_min + (value - in_min) * scale
}

/// Adaptive min/max envelope over a scalar level
///
/// Two biased IIR filters track the extremes: the max tracker follows rises
/// quickly and decays very slowly, the min tracker is the mirror image. How
/// slowly the bounds creep back toward the signal is set by `aggression`.
pub struct DynamicRange {
    max_filter: BiasedIirFilter,
    min_filter: BiasedIirFilter,

    /// Whether the tracker updates its maximum
    pub use_max: bool,

    /// Whether the tracker updates its minimum
    pub use_min: bool,

    aggression: f64,
}

impl DynamicRange {
    pub fn new() -> Self {
        let mut range = Self {
            max_filter: BiasedIirFilter::with_initial(vec![1.0]),
            min_filter: BiasedIirFilter::with_initial(vec![0.0]),
            use_max: true,
            use_min: true,
            aggression: 0.5,
        };
        range.set_alphas();
        range
    }

    /// Set how aggressively the bounds contract, 0.0 (slowest) to 1.0
    pub fn set_aggression(&mut self, aggression: f64) {
        self.aggression = aggression.clamp(0.0, 1.0);
        self.set_alphas();
    }

    pub fn aggression(&self) -> f64 {
        self.aggression
    }

    /// Feed the next level and get the updated (min, max) bounds
    pub fn update(&mut self, value: f64) -> (f64, f64) {
        let mut new_max = 1.0;
        let mut new_min = 0.0;

        if self.use_max {
            new_max = self.max_filter.apply_value(value, 0);
        }
        if self.use_min {
            new_min = self.min_filter.apply_value(value, 0);
        }

        (new_min, new_max)
    }

    /// Force the bounds to the given values
    pub fn set(&mut self, min: f64, max: f64) {
        self.max_filter = BiasedIirFilter::with_initial(vec![max]);
        self.min_filter = BiasedIirFilter::with_initial(vec![min]);
        self.set_alphas();
    }

    /// Restore the initial 0..1 bounds
    pub fn reset(&mut self) {
        self.set(0.0, 1.0);
    }

    fn set_alphas(&mut self) {
        let slow = remap(
            (1.0 - self.aggression).sqrt(),
            0.0,
            1.0,
            ALPHA_MIN,
            ALPHA_MAX,
        );

        self.max_filter.upwards_alpha = 0.6;
        self.max_filter.downwards_alpha = slow;

        self.min_filter.upwards_alpha = slow;
        self.min_filter.downwards_alpha = 0.6;
    }
}

impl Default for DynamicRange {
    fn default() -> Self {
        Self::new()
    }
}

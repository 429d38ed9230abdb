//! Spectrum post-processing for visual output

pub mod processor;
pub mod range;
pub mod smoothing;
pub mod weighting;

pub use processor::{ProcessorConfig, SpectrumProcessor};
pub use range::{remap, remap_to_unit, DynamicRange};
pub use smoothing::BiasedIirFilter;
pub use weighting::{a_weight_offset_db, magnitude_to_db};

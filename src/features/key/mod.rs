//! Key detection modules
//!
//! Detect musical key using:
//! - Krumhansl-Schmuckler profiles rotated to all 24 keys
//! - Dot-product matching against the time-averaged chroma

pub mod detector;
pub mod templates;

pub use detector::detect_key;
pub use templates::KeyTemplates;

use crate::analysis::result::KeyEstimate;

/// Key detection result
#[derive(Debug, Clone)]
pub struct KeyDetectionResult {
    /// Detected key (best match)
    pub key: KeyEstimate,

    /// Raw dot-product score of the detected key (0.0 for the silent default)
    pub score: f32,

    /// All 24 key scores in evaluation order (tonic ascending, major before minor)
    pub all_scores: Vec<(KeyEstimate, f32)>,

    /// Top 3 keys, highest first
    /// Useful for ambiguous cases such as relative major/minor pairs
    pub top_keys: Vec<(KeyEstimate, f32)>,
}

//! Feature input
//!
//! The analysis consumes precomputed features (chroma, beats, tempo) from an
//! upstream extractor. This module defines that contract and a JSON reader.

pub mod features;
pub mod source;

pub use features::FeatureSet;
pub use source::{FeatureExtractor, JsonFeatureReader};

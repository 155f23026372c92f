//! Feature sources
//!
//! Audio decoding and feature extraction run outside this crate. A
//! `FeatureExtractor` is the seam where they plug in; failures surface as
//! `AnalysisError::ExtractionFailed` and are never recovered from here.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::features::FeatureSet;
use crate::error::AnalysisError;

/// Produces a `FeatureSet` for an audio file
pub trait FeatureExtractor: Send + Sync {
    /// Extract features for the file at `path`
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ExtractionFailed` when the file cannot be
    /// decoded or analyzed.
    fn extract(&self, path: &Path) -> Result<FeatureSet, AnalysisError>;
}

/// Reads features previously exported as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFeatureReader;

impl JsonFeatureReader {
    /// Parse features from a JSON string
    pub fn parse(json: &str) -> Result<FeatureSet, AnalysisError> {
        serde_json::from_str(json)
            .map_err(|e| AnalysisError::ExtractionFailed(format!("Invalid feature JSON: {}", e)))
    }
}

impl FeatureExtractor for JsonFeatureReader {
    fn extract(&self, path: &Path) -> Result<FeatureSet, AnalysisError> {
        log::debug!("Reading features from: {}", path.display());
        let file = File::open(path).map_err(|e| {
            AnalysisError::ExtractionFailed(format!("Cannot open {}: {}", path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AnalysisError::ExtractionFailed(format!(
                "Invalid feature JSON in {}: {}",
                path.display(),
                e
            ))
        })
    }
}

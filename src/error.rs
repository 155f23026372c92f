//! Error types for the chord analysis engine

use std::fmt;

/// Errors that can occur during chord/key analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters (malformed feature contract)
    InvalidInput(String),

    /// Upstream feature extraction failed (decode, chroma, beat tracking)
    ExtractionFailed(String),

    /// Optional chord recognizer is not available in this build/runtime
    RecognizerUnavailable(String),

    /// Optional chord recognizer ran but could not produce a result
    RecognizerFailed(String),

    /// Processing error during analysis
    ProcessingError(String),
}

impl AnalysisError {
    /// Whether a caller may recover by switching to the template-matching path
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::RecognizerUnavailable(_) | AnalysisError::RecognizerFailed(_)
        )
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            AnalysisError::RecognizerUnavailable(msg) => {
                write!(f, "Recognizer unavailable: {}", msg)
            }
            AnalysisError::RecognizerFailed(msg) => write!(f, "Recognizer failed: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

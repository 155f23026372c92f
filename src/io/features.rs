//! Feature extractor output contract

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::features::chords::segmenter::frames_to_seconds;
use crate::features::chroma::ChromaVector;

/// Features of one track, as produced by the upstream extractor
///
/// An empty `chroma` represents empty or undecodable-to-nothing audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Chroma frames (C..B per frame), one per hop
    pub chroma: Vec<ChromaVector>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Hop between chroma frames, in samples
    pub hop_length: u32,

    /// Beat positions as frame indices, non-decreasing (may be empty)
    #[serde(default)]
    pub beat_frames: Vec<usize>,

    /// Tempo in BPM (0 when unknown)
    #[serde(default)]
    pub tempo: f32,

    /// Track duration in seconds, when known more precisely than the frame grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f32>,
}

impl FeatureSet {
    /// Create a feature set without beats or tempo
    pub fn new(chroma: Vec<ChromaVector>, sample_rate: u32, hop_length: u32) -> Self {
        Self {
            chroma,
            sample_rate,
            hop_length,
            beat_frames: vec![],
            tempo: 0.0,
            duration_seconds: None,
        }
    }

    /// Attach beat frames
    pub fn with_beats(mut self, beat_frames: Vec<usize>) -> Self {
        self.beat_frames = beat_frames;
        self
    }

    /// Attach a tempo estimate
    pub fn with_tempo(mut self, tempo: f32) -> Self {
        self.tempo = tempo;
        self
    }

    /// Number of chroma frames
    pub fn n_frames(&self) -> usize {
        self.chroma.len()
    }

    /// Whether there is nothing to analyze
    pub fn is_empty(&self) -> bool {
        self.chroma.is_empty()
    }

    /// Track duration in seconds
    ///
    /// `duration_seconds` when set to a positive finite value, otherwise the
    /// end time of the last chroma frame.
    pub fn duration(&self) -> f32 {
        match self.duration_seconds {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => frames_to_seconds(self.chroma.len(), self.sample_rate, self.hop_length),
        }
    }

    /// Check the contract the analysis relies on
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the sample rate or hop length
    /// is zero, or a chroma value or the tempo is not finite.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.sample_rate == 0 {
            return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
        }
        if self.hop_length == 0 {
            return Err(AnalysisError::InvalidInput("Invalid hop length".to_string()));
        }
        if !self.tempo.is_finite() {
            return Err(AnalysisError::InvalidInput(format!(
                "Tempo must be finite, got {}",
                self.tempo
            )));
        }
        if let Some(i) = self
            .chroma
            .iter()
            .position(|frame| frame.iter().any(|x| !x.is_finite()))
        {
            return Err(AnalysisError::InvalidInput(format!(
                "Chroma frame {} contains non-finite values",
                i
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_from_frames() {
        let features = FeatureSet::new(vec![[0.0; 12]; 86], 22050, 512);
        assert!((features.duration() - 86.0 * 512.0 / 22050.0).abs() < 1e-5);
    }

    #[test]
    fn test_duration_override() {
        let mut features = FeatureSet::new(vec![[0.0; 12]; 86], 22050, 512);
        features.duration_seconds = Some(2.5);
        assert_eq!(features.duration(), 2.5);
        features.duration_seconds = Some(-1.0);
        assert!(features.duration() > 1.9);
    }

    #[test]
    fn test_validate() {
        assert!(FeatureSet::new(vec![], 22050, 512).validate().is_ok());
        assert!(FeatureSet::new(vec![], 0, 512).validate().is_err());
        assert!(FeatureSet::new(vec![], 22050, 0).validate().is_err());

        let mut frame = [0.0f32; 12];
        frame[3] = f32::NAN;
        let err = FeatureSet::new(vec![[0.0; 12], frame], 22050, 512)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        assert!(err.to_string().contains("frame 1"));
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"chroma": [], "sample_rate": 22050, "hop_length": 512}"#;
        let features: FeatureSet = serde_json::from_str(json).unwrap();
        assert!(features.is_empty());
        assert!(features.beat_frames.is_empty());
        assert_eq!(features.tempo, 0.0);
    }
}

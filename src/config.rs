//! Configuration parameters for chord and key analysis

use serde::{Deserialize, Serialize};

/// Analysis configuration parameters
///
/// Defaults reproduce the tuned constants of the reference chord pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // Chroma smoothing
    /// Median filter length along time, in frames (default: 7)
    pub median_window: usize,

    // Segmentation
    /// Window length used when beat tracking yields fewer than 2 beats (default: 0.5 s)
    pub fallback_window_seconds: f32,

    /// Beats spanned by one chord window (default: 1.0)
    ///
    /// Values >= 1 group that many beats per window, values < 1 split each
    /// beat into `round(1 / beats_per_chord)` sub-windows.
    pub beats_per_chord: f32,

    /// Windows whose mean chroma L2 norm falls below this are "N.C." (default: 0.05)
    pub silence_threshold: f32,

    /// Score multiplier applied to the previous window's chord (default: 1.2)
    pub persistence_bias: f32,

    // Bar quantization
    /// Resample the chord sequence onto bar windows before merging (default: true)
    pub quantize_to_bars: bool,

    /// Beats per bar used to derive the bar length from tempo (default: 4)
    pub beats_per_bar: u32,

    /// Bar length when tempo is unknown (default: 2.0 s)
    pub fallback_bar_seconds: f32,

    /// Lower clamp on bar length (default: 0.5 s)
    pub min_bar_seconds: f32,

    /// Upper clamp on bar length (default: 12.0 s)
    pub max_bar_seconds: f32,

    // External recognizer
    /// Confidence reported for spans from recognizers without native scores (default: 0.8)
    pub external_confidence: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            median_window: 7,
            fallback_window_seconds: 0.5,
            beats_per_chord: 1.0,
            silence_threshold: 0.05,
            persistence_bias: 1.2,
            quantize_to_bars: true,
            beats_per_bar: 4,
            fallback_bar_seconds: 2.0,
            min_bar_seconds: 0.5,
            max_bar_seconds: 12.0,
            external_confidence: 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.median_window, 7);
        assert_eq!(config.silence_threshold, 0.05);
        assert_eq!(config.persistence_bias, 1.2);
        assert_eq!(config.fallback_bar_seconds, 2.0);
        assert_eq!(config.beats_per_bar, 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"persistence_bias": 1.0}"#).unwrap();
        assert_eq!(config.persistence_bias, 1.0);
        assert_eq!(config.median_window, 7);
        assert!(config.quantize_to_bars);
    }
}

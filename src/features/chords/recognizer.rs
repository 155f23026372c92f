//! Chord recognition engines
//!
//! A `ChordRecognizer` turns features into raw chord spans. The template
//! matcher always succeeds; optional engines may be unavailable or fail, in
//! which case `recognize_with_fallback` switches to a secondary engine.

use super::segmenter::segment_chords;
use super::templates::ChordTemplates;
use crate::analysis::result::ChordSegment;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::io::FeatureSet;

/// Produces chord spans from track features
pub trait ChordRecognizer: Send + Sync {
    /// Short engine name for logs
    fn name(&self) -> &'static str;

    /// Recognize chords, returning spans ordered by start time
    ///
    /// # Errors
    ///
    /// `RecognizerUnavailable` / `RecognizerFailed` mark failures a caller may
    /// recover from with another engine; other kinds must be propagated.
    fn recognize(
        &self,
        features: &FeatureSet,
        config: &AnalysisConfig,
    ) -> Result<Vec<ChordSegment>, AnalysisError>;
}

/// Beat-synchronous template matching against the chord catalogue
#[derive(Debug, Clone, Copy)]
pub struct TemplateRecognizer<'a> {
    templates: &'a ChordTemplates,
}

impl<'a> TemplateRecognizer<'a> {
    /// Match against a specific catalogue
    pub fn new(templates: &'a ChordTemplates) -> Self {
        Self { templates }
    }
}

impl Default for TemplateRecognizer<'static> {
    fn default() -> Self {
        Self::new(ChordTemplates::global())
    }
}

impl ChordRecognizer for TemplateRecognizer<'_> {
    fn name(&self) -> &'static str {
        "template"
    }

    fn recognize(
        &self,
        features: &FeatureSet,
        config: &AnalysisConfig,
    ) -> Result<Vec<ChordSegment>, AnalysisError> {
        Ok(segment_chords(
            &features.chroma,
            features.sample_rate,
            features.hop_length,
            &features.beat_frames,
            self.templates,
            config,
        ))
    }
}

/// Run `primary`, falling back to `fallback` on a recoverable failure
///
/// Only errors for which `AnalysisError::is_recoverable` holds trigger the
/// fallback; anything else, and any failure of the fallback itself, is
/// returned to the caller.
pub fn recognize_with_fallback(
    primary: &dyn ChordRecognizer,
    fallback: &dyn ChordRecognizer,
    features: &FeatureSet,
    config: &AnalysisConfig,
) -> Result<Vec<ChordSegment>, AnalysisError> {
    match primary.recognize(features, config) {
        Ok(segments) => {
            log::debug!("{} recognizer produced {} spans", primary.name(), segments.len());
            Ok(segments)
        }
        Err(e) if e.is_recoverable() => {
            log::warn!(
                "{} recognizer unusable ({}), falling back to {}",
                primary.name(),
                e,
                fallback.name()
            );
            fallback.recognize(features, config)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing(AnalysisError);

    impl ChordRecognizer for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn recognize(
            &self,
            _features: &FeatureSet,
            _config: &AnalysisConfig,
        ) -> Result<Vec<ChordSegment>, AnalysisError> {
            Err(self.0.clone())
        }
    }

    fn c_major_features() -> FeatureSet {
        let c = ChordTemplates::global().get(0).unwrap().vector;
        FeatureSet::new(vec![c; 43], 22050, 512)
    }

    #[test]
    fn test_template_recognizer() {
        let segments = TemplateRecognizer::default()
            .recognize(&c_major_features(), &AnalysisConfig::default())
            .unwrap();
        assert!(!segments.is_empty());
        assert!(segments.iter().all(|s| s.chord == "C"));
    }

    #[test]
    fn test_fallback_on_unavailable() {
        let primary = Failing(AnalysisError::RecognizerUnavailable("no model".into()));
        let segments = recognize_with_fallback(
            &primary,
            &TemplateRecognizer::default(),
            &c_major_features(),
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert_eq!(segments[0].chord, "C");
    }

    #[test]
    fn test_fallback_on_failure() {
        let primary = Failing(AnalysisError::RecognizerFailed("bad output".into()));
        let result = recognize_with_fallback(
            &primary,
            &TemplateRecognizer::default(),
            &c_major_features(),
            &AnalysisConfig::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_unexpected_error_propagates() {
        let primary = Failing(AnalysisError::ExtractionFailed("decoder".into()));
        let result = recognize_with_fallback(
            &primary,
            &TemplateRecognizer::default(),
            &c_major_features(),
            &AnalysisConfig::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            AnalysisError::ExtractionFailed("decoder".into())
        );
    }

    #[test]
    fn test_both_failing_propagates_fallback_error() {
        let primary = Failing(AnalysisError::RecognizerUnavailable("a".into()));
        let fallback = Failing(AnalysisError::RecognizerFailed("b".into()));
        let result = recognize_with_fallback(
            &primary,
            &fallback,
            &c_major_features(),
            &AnalysisConfig::default(),
        );
        assert_eq!(result.unwrap_err(), AnalysisError::RecognizerFailed("b".into()));
    }
}

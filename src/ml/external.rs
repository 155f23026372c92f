//! External chord model adapter
//!
//! Wraps an optional learned chord model behind the `ChordRecognizer`
//! interface. Models report onset events only; spans are closed at the next
//! onset or at the end of the track.

use super::labels::simplify_chord_label;
use crate::analysis::result::ChordSegment;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::chords::ChordRecognizer;
use crate::io::FeatureSet;

/// A chord onset reported by an external model
#[derive(Debug, Clone, PartialEq)]
pub struct ChordEvent {
    /// Onset time in seconds
    pub start: f32,
    /// Model label, e.g. "G:maj7" or "N"
    pub label: String,
}

impl ChordEvent {
    /// Create an event
    pub fn new(start: f32, label: impl Into<String>) -> Self {
        Self {
            start,
            label: label.into(),
        }
    }
}

/// A learned chord model
pub trait ChordModel: Send + Sync {
    /// Predict chord onsets for a track
    ///
    /// # Errors
    ///
    /// Returns `RecognizerFailed` when inference fails.
    fn predict(&self, features: &FeatureSet) -> Result<Vec<ChordEvent>, AnalysisError>;
}

/// Recognizer backed by an optional external model
///
/// Without a model every call reports `RecognizerUnavailable`, which lets
/// callers fall back to template matching.
#[derive(Default)]
pub struct ExternalModelRecognizer {
    model: Option<Box<dyn ChordModel>>,
}

impl ExternalModelRecognizer {
    /// Wrap a loaded model
    pub fn new(model: Box<dyn ChordModel>) -> Self {
        Self { model: Some(model) }
    }

    /// A recognizer with no model installed
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    /// Whether a model is installed
    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }
}

impl std::fmt::Debug for ExternalModelRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalModelRecognizer")
            .field("available", &self.is_available())
            .finish()
    }
}

impl ChordRecognizer for ExternalModelRecognizer {
    fn name(&self) -> &'static str {
        "external"
    }

    fn recognize(
        &self,
        features: &FeatureSet,
        config: &AnalysisConfig,
    ) -> Result<Vec<ChordSegment>, AnalysisError> {
        let model = self.model.as_ref().ok_or_else(|| {
            AnalysisError::RecognizerUnavailable("no external chord model installed".to_string())
        })?;
        let events = model.predict(features)?;
        events_to_segments(&events, features.duration(), config.external_confidence)
    }
}

/// Close onset events into chord spans
///
/// Each span ends at the next event's start, the last at `duration`. Labels
/// are simplified and every span gets the same `confidence`, since models of
/// this kind report none. Events are ordered by start time first, and span
/// bounds are clamped to `[0, duration]`; spans left empty (duplicate onsets,
/// onsets past the end) are dropped.
///
/// # Errors
///
/// Returns `RecognizerFailed` if an event has a non-finite start time.
pub fn events_to_segments(
    events: &[ChordEvent],
    duration: f32,
    confidence: f32,
) -> Result<Vec<ChordSegment>, AnalysisError> {
    if let Some(bad) = events.iter().find(|e| !e.start.is_finite()) {
        return Err(AnalysisError::RecognizerFailed(format!(
            "event '{}' has non-finite start time",
            bad.label
        )));
    }

    let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
    let clamp = |t: f32| t.clamp(0.0, duration);

    let mut sorted: Vec<&ChordEvent> = events.iter().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let segments: Vec<ChordSegment> = sorted
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let end = sorted.get(i + 1).map_or(duration, |next| next.start);
            ChordSegment::new(
                clamp(event.start),
                clamp(end),
                simplify_chord_label(&event.label),
                confidence,
            )
        })
        .filter(|seg| seg.duration() > 0.0)
        .collect();

    if segments.len() < events.len() {
        log::debug!(
            "Dropped {} empty spans from {} model events",
            events.len() - segments.len(),
            events.len()
        );
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::NO_CHORD;

    struct FixedModel(Vec<ChordEvent>);

    impl ChordModel for FixedModel {
        fn predict(&self, _features: &FeatureSet) -> Result<Vec<ChordEvent>, AnalysisError> {
            Ok(self.0.clone())
        }
    }

    fn features() -> FeatureSet {
        // 100 frames at 512/22050 s
        FeatureSet::new(vec![[0.0f32; 12]; 100], 22050, 512)
    }

    #[test]
    fn test_unavailable() {
        let recognizer = ExternalModelRecognizer::unavailable();
        assert!(!recognizer.is_available());
        let err = recognizer
            .recognize(&features(), &AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::RecognizerUnavailable(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_events_become_spans() {
        let model = FixedModel(vec![
            ChordEvent::new(0.0, "N"),
            ChordEvent::new(0.5, "C:maj"),
            ChordEvent::new(1.5, "A:min7"),
        ]);
        let recognizer = ExternalModelRecognizer::new(Box::new(model));
        let fs = features();
        let segments = recognizer
            .recognize(&fs, &AnalysisConfig::default())
            .unwrap();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], ChordSegment::new(0.0, 0.5, NO_CHORD, 0.8));
        assert_eq!(segments[1], ChordSegment::new(0.5, 1.5, "C", 0.8));
        assert_eq!(segments[2].chord, "Amin7");
        assert_eq!(segments[2].end, fs.duration());
    }

    #[test]
    fn test_confidence_from_config() {
        let segments = events_to_segments(&[ChordEvent::new(0.0, "D:min")], 3.0, 0.55).unwrap();
        assert_eq!(segments, vec![ChordSegment::new(0.0, 3.0, "Dmin", 0.55)]);
    }

    #[test]
    fn test_unordered_events_are_sorted() {
        let events = vec![ChordEvent::new(2.0, "G:maj"), ChordEvent::new(0.0, "C:maj")];
        let segments = events_to_segments(&events, 4.0, 0.8).unwrap();
        assert_eq!(segments[0], ChordSegment::new(0.0, 2.0, "C", 0.8));
        assert_eq!(segments[1], ChordSegment::new(2.0, 4.0, "G", 0.8));
    }

    #[test]
    fn test_non_finite_start_fails() {
        let err = events_to_segments(&[ChordEvent::new(f32::NAN, "C:maj")], 1.0, 0.8).unwrap_err();
        assert!(matches!(err, AnalysisError::RecognizerFailed(_)));
    }

    #[test]
    fn test_onset_past_end_is_clamped() {
        let events = vec![ChordEvent::new(0.0, "C:maj"), ChordEvent::new(9.0, "G:maj")];
        let segments = events_to_segments(&events, 4.5, 0.8).unwrap();
        assert_eq!(segments, vec![ChordSegment::new(0.0, 4.5, "C", 0.8)]);
    }

    #[test]
    fn test_duplicate_onsets_dropped() {
        let events = vec![
            ChordEvent::new(0.0, "C:maj"),
            ChordEvent::new(1.0, "F:maj"),
            ChordEvent::new(1.0, "G:maj"),
        ];
        let segments = events_to_segments(&events, 3.0, 0.8).unwrap();
        assert_eq!(
            segments,
            vec![
                ChordSegment::new(0.0, 1.0, "C", 0.8),
                ChordSegment::new(1.0, 3.0, "G", 0.8),
            ]
        );
        assert!(segments.iter().all(|s| s.end > s.start));
    }

    #[test]
    fn test_negative_onset_starts_at_zero() {
        let events = vec![ChordEvent::new(-0.5, "N"), ChordEvent::new(1.0, "E:min")];
        let segments = events_to_segments(&events, 2.0, 0.8).unwrap();
        assert_eq!(segments[0], ChordSegment::new(0.0, 1.0, NO_CHORD, 0.8));
        assert!(segments[0].is_no_chord());
    }

    #[test]
    fn test_no_events() {
        assert!(events_to_segments(&[], 1.0, 0.8).unwrap().is_empty());
    }
}

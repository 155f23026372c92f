//! Key detection algorithm
//!
//! Matches the time-averaged chroma distribution against rotated
//! Krumhansl-Schmuckler profiles to detect the musical key of a track.
//!
//! Scores are plain dot products rather than Pearson correlations; upstream
//! chroma is normalized per frame, which keeps the two rankings close.
//!
//! # Reference
//!
//! Krumhansl, C. L. (1990). *Cognitive Foundations of Musical Pitch*. Oxford
//! University Press.

use super::{templates::KeyTemplates, KeyDetectionResult};
use crate::analysis::result::{KeyEstimate, Mode, PitchClass};
use crate::features::chroma::normalization::{dot, mean_chroma};
use crate::features::chroma::ChromaVector;

/// Detect musical key from chroma vectors
///
/// Averages chroma vectors across all frames, then computes the dot product
/// with each of the 24 key templates. Keys are evaluated tonic ascending,
/// major before minor, and only a strictly higher score replaces the current
/// best, so ties resolve to the first key encountered.
///
/// # Arguments
///
/// * `chroma_vectors` - 12-element chroma vectors (one per frame)
/// * `templates` - Key templates (Krumhansl-Schmuckler profiles)
///
/// # Returns
///
/// Key detection result. When the averaged chroma carries no energy (including
/// an empty input) the key defaults to C major with an empty score table.
///
/// # Example
///
/// ```
/// use chordline::features::key::{detect_key, KeyTemplates};
///
/// let mut frame = [0.0f32; 12];
/// frame[0] = 1.0; // C
/// frame[4] = 1.0; // E
/// frame[7] = 1.0; // G
/// let result = detect_key(&vec![frame; 8], &KeyTemplates::new());
/// assert_eq!(result.key.name(), "C");
/// ```
pub fn detect_key(chroma_vectors: &[ChromaVector], templates: &KeyTemplates) -> KeyDetectionResult {
    log::debug!("Detecting key from {} chroma vectors", chroma_vectors.len());

    let mean = mean_chroma(chroma_vectors);
    let energy: f32 = mean.iter().sum();
    if energy <= 0.0 || !energy.is_finite() {
        log::debug!("Chroma has no energy, defaulting to C major");
        return KeyDetectionResult {
            key: KeyEstimate::default(),
            score: 0.0,
            all_scores: vec![],
            top_keys: vec![],
        };
    }

    let mut all_scores = Vec::with_capacity(24);
    let mut best = KeyEstimate::default();
    let mut best_score = f32::NEG_INFINITY;

    for tonic in 0..12 {
        let candidates = [
            (Mode::Major, templates.get_major_template(tonic)),
            (Mode::Minor, templates.get_minor_template(tonic)),
        ];
        for (mode, template) in candidates {
            let key = KeyEstimate::new(PitchClass::new(tonic), mode);
            let score = dot(&mean, template);
            if score > best_score {
                best_score = score;
                best = key;
            }
            all_scores.push((key, score));
        }
    }

    // Stable sort keeps evaluation order among equal scores
    let mut ranked = all_scores.clone();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let top_keys: Vec<(KeyEstimate, f32)> = ranked.into_iter().take(3).collect();

    log::debug!("Detected key: {}, score: {:.4}", best.name(), best_score);

    KeyDetectionResult {
        key: best,
        score: best_score,
        all_scores,
        top_keys,
    }
}

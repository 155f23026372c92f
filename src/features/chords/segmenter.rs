//! Beat-synchronous chord segmentation
//!
//! Assigns the best-matching chord template to every beat-bounded window of a
//! chroma sequence.
//!
//! # Algorithm
//!
//! 1. Median-filter the chroma along time to suppress transients
//! 2. Build window boundaries from beat frames (or fixed ~0.5 s steps when
//!    fewer than 2 beats are available), always tiling `[0, T)`
//! 3. Average each window; quiet windows become "N.C."
//! 4. Score the normalized window against every template, boosting the
//!    previous window's chord by the persistence bias
//! 5. Report the unbiased match of the winner as confidence
//!
//! # Example
//!
//! ```
//! use chordline::features::chords::segmenter::segment_chords;
//! use chordline::features::chords::templates::ChordTemplates;
//! use chordline::AnalysisConfig;
//!
//! let templates = ChordTemplates::global();
//! let c_major = templates.get(0).unwrap().vector;
//! let chroma = vec![c_major; 86];
//!
//! let segments = segment_chords(&chroma, 22050, 512, &[], templates, &AnalysisConfig::default());
//! assert!(segments.iter().all(|s| s.chord == "C"));
//! ```

use super::templates::ChordTemplates;
use crate::analysis::result::ChordSegment;
use crate::config::AnalysisConfig;
use crate::features::chroma::normalization::{dot, l2_norm, mean_chroma, normalize_l2};
use crate::features::chroma::smoothing::median_filter;
use crate::features::chroma::ChromaVector;

/// Outcome of matching one window against the template catalogue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMatch {
    /// Catalogue index of the winning template, `None` for "N.C."
    pub template_index: Option<usize>,

    /// Unbiased match of the winner (0.0-1.0)
    pub confidence: f32,
}

/// Convert a frame index to seconds
pub fn frames_to_seconds(frame: usize, sample_rate: u32, hop_length: u32) -> f32 {
    if sample_rate == 0 {
        return 0.0;
    }
    (frame as f64 * hop_length as f64 / sample_rate as f64) as f32
}

/// Convert seconds to a whole number of frames (rounding down)
pub fn seconds_to_frames(seconds: f32, sample_rate: u32, hop_length: u32) -> usize {
    if hop_length == 0 || seconds <= 0.0 {
        return 0;
    }
    (seconds as f64 * sample_rate as f64 / hop_length as f64).floor() as usize
}

/// Segment a chroma sequence into chord spans
///
/// # Arguments
///
/// * `chroma` - Chroma frames in time order
/// * `sample_rate` - Sample rate in Hz
/// * `hop_length` - Hop between chroma frames, in samples
/// * `beat_frames` - Non-decreasing beat positions in frames (may be empty)
/// * `templates` - Chord template catalogue
/// * `config` - Segmentation parameters
///
/// # Returns
///
/// Contiguous chord spans covering `[0, T)`, where `T` is the time of frame
/// `chroma.len()`. Empty when `chroma` is empty.
pub fn segment_chords(
    chroma: &[ChromaVector],
    sample_rate: u32,
    hop_length: u32,
    beat_frames: &[usize],
    templates: &ChordTemplates,
    config: &AnalysisConfig,
) -> Vec<ChordSegment> {
    if chroma.is_empty() {
        return vec![];
    }

    let smoothed = median_filter(chroma, config.median_window);

    let boundaries = window_boundaries(
        chroma.len(),
        beat_frames,
        sample_rate,
        hop_length,
        config.fallback_window_seconds,
        config.beats_per_chord,
    );

    log::debug!(
        "Segmenting {} frames into {} windows ({} beats supplied)",
        chroma.len(),
        boundaries.len().saturating_sub(1),
        beat_frames.len()
    );

    let mut segments = Vec::with_capacity(boundaries.len());
    let mut prev_index: Option<usize> = None;

    for pair in boundaries.windows(2) {
        let (s, e) = (pair[0], pair[1]);
        let mean = mean_chroma(&smoothed[s..e]);
        let matched = match_window(&mean, templates, prev_index, config);

        let label = matched
            .template_index
            .and_then(|i| templates.get(i))
            .map(|t| t.label.as_str());
        let start = frames_to_seconds(s, sample_rate, hop_length);
        let end = frames_to_seconds(e, sample_rate, hop_length);
        segments.push(match label {
            Some(label) => ChordSegment::new(start, end, label, matched.confidence),
            None => ChordSegment::no_chord(start, end),
        });

        prev_index = matched.template_index;
    }

    segments
}

/// Match one averaged window against the catalogue
///
/// Windows with L2 norm below `config.silence_threshold` yield no template and
/// zero confidence. Otherwise the score of `prev_index` (if any) is multiplied
/// by `config.persistence_bias` before picking the maximum; the first maximum
/// wins ties. The bias only affects selection: confidence is the plain dot
/// product of the normalized window with the winner, clamped to `[0, 1]`.
pub fn match_window(
    window_mean: &ChromaVector,
    templates: &ChordTemplates,
    prev_index: Option<usize>,
    config: &AnalysisConfig,
) -> WindowMatch {
    let norm = l2_norm(window_mean);
    if norm.is_nan() || norm < config.silence_threshold || templates.is_empty() {
        return WindowMatch {
            template_index: None,
            confidence: 0.0,
        };
    }

    let vec = normalize_l2(window_mean);
    let mut scores: Vec<f32> = templates.iter().map(|t| dot(&vec, &t.vector)).collect();

    if let Some(score) = prev_index.and_then(|p| scores.get_mut(p)) {
        *score *= config.persistence_bias;
    }

    let mut best_index = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best_index] {
            best_index = i;
        }
    }

    let confidence = templates
        .get(best_index)
        .map(|t| dot(&vec, &t.vector))
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    WindowMatch {
        template_index: Some(best_index),
        confidence,
    }
}

/// Build strictly increasing window boundaries tiling `[0, n_frames]`
///
/// With fewer than 2 beats, boundaries are placed every
/// `max(1, floor(fallback_window_seconds * sr / hop))` frames. Otherwise the
/// beat frames are used, grouped or subdivided by `beats_per_chord`.
/// Boundaries past the end are clamped, and frame 0 and `n_frames` are added
/// when missing.
pub fn window_boundaries(
    n_frames: usize,
    beat_frames: &[usize],
    sample_rate: u32,
    hop_length: u32,
    fallback_window_seconds: f32,
    beats_per_chord: f32,
) -> Vec<usize> {
    let raw: Vec<usize> = if beat_frames.len() < 2 {
        let step = seconds_to_frames(fallback_window_seconds, sample_rate, hop_length).max(1);
        (0..n_frames).step_by(step).collect()
    } else {
        apply_beats_per_chord(beat_frames, beats_per_chord)
    };

    let mut boundaries = Vec::with_capacity(raw.len() + 2);
    boundaries.push(0);
    for b in raw.into_iter().map(|b| b.min(n_frames)) {
        if b > *boundaries.last().unwrap_or(&0) {
            boundaries.push(b);
        }
    }
    if *boundaries.last().unwrap_or(&0) < n_frames {
        boundaries.push(n_frames);
    }
    boundaries
}

/// Group (`d >= 1`) or subdivide (`d < 1`) beat intervals
fn apply_beats_per_chord(beat_frames: &[usize], beats_per_chord: f32) -> Vec<usize> {
    let d = if beats_per_chord.is_finite() && beats_per_chord > 0.0 {
        beats_per_chord
    } else {
        1.0
    };

    if d >= 1.0 {
        let group = (d.round() as usize).max(1);
        return beat_frames.iter().copied().step_by(group).collect();
    }

    let parts = ((1.0 / d).round() as usize).max(1);
    let mut out = Vec::with_capacity(beat_frames.len() * parts);
    for pair in beat_frames.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b <= a {
            out.push(a);
            continue;
        }
        for j in 0..parts {
            out.push(a + (b - a) * j / parts);
        }
    }
    if let Some(&last) = beat_frames.last() {
        out.push(last);
    }
    out
}

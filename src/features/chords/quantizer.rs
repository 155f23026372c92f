//! Bar quantization and chord merging
//!
//! Resamples a chord sequence onto fixed-length bar windows (one chord per
//! bar, chosen by largest temporal overlap) and collapses runs of identical
//! labels into single spans.

use crate::analysis::result::ChordSegment;
use crate::config::AnalysisConfig;

/// Tolerance for the final partial bar
const TIME_EPSILON: f32 = 1e-6;

/// Bar length in seconds for a tempo
///
/// `beats_per_bar * 60 / tempo` when tempo is positive, otherwise
/// `config.fallback_bar_seconds`, clamped to
/// `[config.min_bar_seconds, config.max_bar_seconds]`.
///
/// # Example
///
/// ```
/// use chordline::features::chords::quantizer::bar_length;
/// use chordline::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(bar_length(120.0, &config), 2.0);
/// assert_eq!(bar_length(0.0, &config), 2.0);
/// ```
pub fn bar_length(tempo: f32, config: &AnalysisConfig) -> f32 {
    let raw = if tempo > 0.0 && tempo.is_finite() {
        config.beats_per_bar as f32 * 60.0 / tempo
    } else {
        config.fallback_bar_seconds
    };
    raw.clamp(config.min_bar_seconds, config.max_bar_seconds)
}

/// Resample chord segments onto bar windows
///
/// Windows are `[t, min(duration, t + bar))` for `t = 0, bar, 2*bar, ...`
/// while `t < duration`. Each window takes the label and confidence of the
/// segment with the largest overlap; ties keep the earliest segment (by start
/// time, then input order). Windows no segment overlaps become "N.C." with
/// zero confidence.
///
/// A non-positive duration returns the input unchanged.
///
/// # Arguments
///
/// * `segments` - Chord spans, in any order
/// * `tempo` - Tempo in BPM (0 when unknown)
/// * `duration` - Track duration in seconds
/// * `config` - Bar parameters
pub fn quantize_to_bars(
    segments: &[ChordSegment],
    tempo: f32,
    duration: f32,
    config: &AnalysisConfig,
) -> Vec<ChordSegment> {
    if duration.is_nan() || duration <= 0.0 {
        return segments.to_vec();
    }

    let bar = bar_length(tempo, config);
    let mut sorted: Vec<&ChordSegment> = segments.iter().collect();
    sorted.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));

    log::debug!(
        "Quantizing {} segments to {:.3}s bars over {:.3}s",
        segments.len(),
        bar,
        duration
    );

    let mut bars = Vec::new();
    let mut index = 0usize;
    loop {
        let t = index as f32 * bar;
        if t >= duration - TIME_EPSILON {
            break;
        }
        let window_end = duration.min(t + bar);

        let mut best: Option<&ChordSegment> = None;
        let mut best_overlap = 0.0f32;
        for &seg in &sorted {
            let overlap = (window_end.min(seg.end) - t.max(seg.start)).max(0.0);
            if overlap > best_overlap {
                best_overlap = overlap;
                best = Some(seg);
            }
        }

        bars.push(match best {
            Some(seg) => ChordSegment::new(t, window_end, seg.chord.clone(), seg.confidence),
            None => ChordSegment::no_chord(t, window_end),
        });
        index += 1;
    }

    bars
}

/// Collapse consecutive segments sharing a label
///
/// A merged span keeps the first start, the latest end and the highest
/// confidence of its members. Idempotent.
pub fn merge_adjacent(segments: &[ChordSegment]) -> Vec<ChordSegment> {
    let mut merged: Vec<ChordSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match merged.last_mut() {
            Some(current) if current.chord == seg.chord => {
                current.end = current.end.max(seg.end);
                current.confidence = current.confidence.max(seg.confidence);
            }
            _ => merged.push(seg.clone()),
        }
    }
    merged
}

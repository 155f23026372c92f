//! # Chordline
//!
//! Key and chord-progression inference from chroma features, producing a
//! bar-aligned chord timeline for lead sheets and practice tools.
//!
//! ## Features
//!
//! - **Key Detection**: Krumhansl-Schmuckler profile matching on averaged chroma
//! - **Chord Recognition**: Beat-synchronous matching against 132 harmonic templates
//!   with a persistence bias that suppresses flicker between related chords
//! - **Bar Quantization**: One chord per bar, chosen by largest overlap
//! - **External Models**: Optional learned recognizers with automatic fallback
//!
//! ## Quick Start
//!
//! ```
//! use chordline::{analyze_features, AnalysisConfig, FeatureSet};
//!
//! // Chroma, beats and tempo come from an upstream feature extractor
//! let mut frame = [0.0f32; 12];
//! frame[0] = 1.0; // C
//! frame[4] = 0.8; // E
//! frame[7] = 0.9; // G
//! let features = FeatureSet::new(vec![frame; 200], 22050, 512).with_tempo(120.0);
//!
//! let result = analyze_features(&features, &AnalysisConfig::default())?;
//!
//! println!("Key: {} {}", result.key, result.scale.as_str());
//! for chord in &result.chords {
//!     println!("{:6.2}-{:6.2}  {}", chord.start, chord.end, chord.chord);
//! }
//! # Ok::<(), chordline::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Features → Key Estimation ─────────────────────────────┐
//!          → Chord Recognition → Bar Quantization → Merge → Result
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod ml;

use rayon::prelude::*;

// Re-export main types
pub use analysis::result::{AnalysisResult, ChordSegment, KeyEstimate, Mode, PitchClass};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use io::{FeatureExtractor, FeatureSet, JsonFeatureReader};

use analysis::result::round_tempo;
use features::chords::{
    merge_adjacent, quantize_to_bars, recognize_with_fallback, ChordRecognizer, TemplateRecognizer,
};
use features::key::{detect_key, KeyTemplates};

/// Main analysis function
///
/// Infers the key and chord timeline of one track using template matching.
///
/// # Arguments
///
/// * `features` - Chroma, beats and tempo from the feature extractor
/// * `config` - Analysis configuration parameters
///
/// # Returns
///
/// `AnalysisResult` with rounded tempo, key, scale and merged chord spans.
/// Empty chroma yields `AnalysisResult::empty()`.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the features are malformed.
pub fn analyze_features(
    features: &FeatureSet,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    analyze_features_with(features, config, &TemplateRecognizer::default())
}

/// Analyze with a chosen chord recognizer
///
/// `recognizer` runs first; if it reports a recoverable failure the template
/// matcher takes over. Key estimation always uses the chroma directly.
///
/// # Errors
///
/// Returns `InvalidInput` for malformed features, or any non-recoverable
/// error from `recognizer`.
pub fn analyze_features_with(
    features: &FeatureSet,
    config: &AnalysisConfig,
    recognizer: &dyn ChordRecognizer,
) -> Result<AnalysisResult, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    if features.is_empty() {
        log::debug!("No chroma frames, returning empty result");
        return Ok(AnalysisResult::empty());
    }
    features.validate()?;

    log::debug!(
        "Starting chord analysis: {} frames at {} Hz (hop {}), {} beats",
        features.n_frames(),
        features.sample_rate,
        features.hop_length,
        features.beat_frames.len()
    );

    let key = detect_key(&features.chroma, &KeyTemplates::new()).key;

    let raw = recognize_with_fallback(
        recognizer,
        &TemplateRecognizer::default(),
        features,
        config,
    )?;

    let spans = if config.quantize_to_bars {
        quantize_to_bars(&raw, features.tempo, features.duration(), config)
    } else {
        raw
    };
    let chords = merge_adjacent(&spans);

    log::debug!(
        "Analysis complete in {:.2} ms: key {}, {} chord spans",
        start_time.elapsed().as_secs_f32() * 1000.0,
        key.name(),
        chords.len()
    );

    Ok(AnalysisResult {
        tempo: round_tempo(features.tempo),
        key: key.tonic,
        scale: key.mode,
        chords,
    })
}

/// Extract features from a file and analyze them
///
/// # Errors
///
/// Extraction failures are returned unchanged; see `analyze_features` for
/// the rest.
pub fn analyze_file(
    extractor: &dyn FeatureExtractor,
    path: &std::path::Path,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let features = extractor.extract(path)?;
    analyze_features(&features, config)
}

/// Analyze many tracks in parallel
///
/// Results are returned in input order, one per track.
pub fn analyze_batch(
    tracks: &[FeatureSet],
    config: &AnalysisConfig,
) -> Vec<Result<AnalysisResult, AnalysisError>> {
    log::debug!("Analyzing batch of {} tracks", tracks.len());
    tracks
        .par_iter()
        .map(|features| analyze_features(features, config))
        .collect()
}

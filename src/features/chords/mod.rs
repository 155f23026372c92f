//! Chord recognition modules
//!
//! Infer a chord timeline from chroma:
//! - Harmonic template catalogue (12 roots x 11 qualities)
//! - Beat-synchronous template matching with persistence bias
//! - Bar quantization and adjacent-label merging
//! - Interchangeable recognition engines with fallback

pub mod quantizer;
pub mod recognizer;
pub mod segmenter;
pub mod templates;

pub use quantizer::{bar_length, merge_adjacent, quantize_to_bars};
pub use recognizer::{recognize_with_fallback, ChordRecognizer, TemplateRecognizer};
pub use segmenter::segment_chords;
pub use templates::{ChordQuality, ChordTemplate, ChordTemplates};

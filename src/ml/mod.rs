//! External recognition modules
//!
//! Adapters that let learned chord models stand in for template matching,
//! plus the label normalization they need.

pub mod external;
pub mod labels;

pub use external::{events_to_segments, ChordEvent, ChordModel, ExternalModelRecognizer};
pub use labels::simplify_chord_label;

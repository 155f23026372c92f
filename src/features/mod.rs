//! Feature analysis modules
//!
//! This module contains the harmonic analysis algorithms:
//! - Chroma smoothing and normalization
//! - Key detection
//! - Chord recognition

pub mod chords;
pub mod chroma;
pub mod key;

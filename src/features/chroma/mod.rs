//! Chroma utilities
//!
//! Operate on pitch-class distributions (12 semitones) produced upstream:
//! - Vector normalization and averaging
//! - Temporal smoothing

pub mod normalization;
pub mod smoothing;

/// Number of pitch classes in a chroma vector
pub const N_PITCH_CLASSES: usize = 12;

/// A single chroma frame: energy per pitch class, C..B
pub type ChromaVector = [f32; N_PITCH_CLASSES];

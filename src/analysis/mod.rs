//! Analysis result types
//!
//! Key, chord span and final result structures shared by every stage.

pub mod result;

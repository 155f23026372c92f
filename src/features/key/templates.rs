//! Krumhansl-Schmuckler key profiles
//!
//! Defines tonal profiles for 24 keys (12 major + 12 minor).

use crate::features::chroma::normalization::rotate;
use crate::features::chroma::ChromaVector;

/// Major-key pitch-class salience, tonic at index 0
pub const MAJOR_PROFILE: ChromaVector = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Minor-key pitch-class salience, tonic at index 0
pub const MINOR_PROFILE: ChromaVector = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Key templates for all 24 keys
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    /// Major key templates (12 keys: C, C#, D, ..., B)
    pub major: [ChromaVector; 12],

    /// Minor key templates (12 keys: C, C#, D, ..., B)
    pub minor: [ChromaVector; 12],
}

impl KeyTemplates {
    /// Create key templates by rotating the reference profiles to every tonic
    pub fn new() -> Self {
        let mut major = [[0.0f32; 12]; 12];
        let mut minor = [[0.0f32; 12]; 12];
        for tonic in 0..12 {
            major[tonic] = rotate(&MAJOR_PROFILE, tonic);
            minor[tonic] = rotate(&MINOR_PROFILE, tonic);
        }
        Self { major, minor }
    }

    /// Major template whose tonic is `tonic` (0 = C)
    pub fn get_major_template(&self, tonic: usize) -> &ChromaVector {
        &self.major[tonic % 12]
    }

    /// Minor template whose tonic is `tonic` (0 = C)
    pub fn get_minor_template(&self, tonic: usize) -> &ChromaVector {
        &self.minor[tonic % 12]
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_templates_are_reference_profiles() {
        let templates = KeyTemplates::new();
        assert_eq!(templates.get_major_template(0), &MAJOR_PROFILE);
        assert_eq!(templates.get_minor_template(0), &MINOR_PROFILE);
    }

    #[test]
    fn test_rotated_tonic_weight() {
        let templates = KeyTemplates::new();
        // A minor: tonic weight sits on A (9), minor third on C (0)
        let a_minor = templates.get_minor_template(9);
        assert_eq!(a_minor[9], 6.33);
        assert_eq!(a_minor[0], 5.38);
        // G major: tonic on G (7), dominant on D (2)
        let g_major = templates.get_major_template(7);
        assert_eq!(g_major[7], 6.35);
        assert_eq!(g_major[2], 5.19);
    }
}

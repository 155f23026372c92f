//! Harmonic chord templates
//!
//! A fixed catalogue of 132 unit-norm chroma fingerprints, one per
//! (root pitch class, chord quality). Catalogue order is root-major,
//! quality-minor, and the segmenter uses positions in this order as chord
//! indices, so `ChordQuality::ALL` must never be reordered.

use std::sync::OnceLock;

use crate::analysis::result::PitchClass;
use crate::features::chroma::normalization::NORM_EPSILON;
use crate::features::chroma::{ChromaVector, N_PITCH_CLASSES};

/// Weight of each chord tone
const CHORD_TONE_WEIGHT: f32 = 1.0;

/// Extra weight at the octave of each chord tone (same pitch class)
const OCTAVE_WEIGHT: f32 = 0.1;

/// Extra weight a fifth above each chord tone
const FIFTH_WEIGHT: f32 = 0.05;

/// Extra weight on the root to favour root-dominant matches
const ROOT_WEIGHT: f32 = 0.2;

/// Chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    /// Major triad
    Major,
    /// Minor triad
    Minor,
    /// Dominant seventh
    Dominant7,
    /// Major seventh
    Major7,
    /// Minor seventh
    Minor7,
    /// Diminished triad
    Diminished,
    /// Augmented triad
    Augmented,
    /// Suspended second
    Sus2,
    /// Suspended fourth
    Sus4,
    /// Major sixth
    Sixth,
    /// Minor sixth
    MinorSixth,
}

impl ChordQuality {
    /// Every quality in catalogue order
    pub const ALL: [ChordQuality; 11] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Sixth,
        ChordQuality::MinorSixth,
    ];

    /// Intervals above the root, in semitones
    pub fn intervals(&self) -> &'static [usize] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Sixth => &[0, 4, 7, 9],
            ChordQuality::MinorSixth => &[0, 3, 7, 9],
        }
    }

    /// Label suffix appended to the root name (empty for major)
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "min",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "min7",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Sixth => "6",
            ChordQuality::MinorSixth => "m6",
        }
    }
}

/// One catalogue entry
#[derive(Debug, Clone, PartialEq)]
pub struct ChordTemplate {
    /// Display label, e.g. "C", "Dmin7", "F#dim"
    pub label: String,
    /// Root pitch class
    pub root: PitchClass,
    /// Chord quality
    pub quality: ChordQuality,
    /// Unit-norm harmonic fingerprint
    pub vector: ChromaVector,
}

impl ChordTemplate {
    /// Build the template for `root` and `quality`
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        let r = root.index();
        let mut v = [0.0f32; N_PITCH_CLASSES];
        for &iv in quality.intervals() {
            v[(r + iv) % 12] = CHORD_TONE_WEIGHT;
            v[(r + iv + 12) % 12] += OCTAVE_WEIGHT;
            v[(r + iv + 7) % 12] += FIFTH_WEIGHT;
        }
        v[r] += ROOT_WEIGHT;

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        for x in v.iter_mut() {
            *x /= norm + NORM_EPSILON;
        }

        Self {
            label: format!("{}{}", root.name(), quality.suffix()),
            root,
            quality,
            vector: v,
        }
    }
}

/// The ordered chord template catalogue
#[derive(Debug, Clone)]
pub struct ChordTemplates {
    templates: Vec<ChordTemplate>,
}

impl ChordTemplates {
    /// Build the full catalogue (12 roots x 11 qualities)
    pub fn new() -> Self {
        let mut templates = Vec::with_capacity(12 * ChordQuality::ALL.len());
        for root in 0..12 {
            for quality in ChordQuality::ALL {
                templates.push(ChordTemplate::new(PitchClass::new(root), quality));
            }
        }
        Self { templates }
    }

    /// Process-wide shared catalogue, built on first use
    pub fn global() -> &'static ChordTemplates {
        static INSTANCE: OnceLock<ChordTemplates> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            log::debug!("Building chord template catalogue");
            ChordTemplates::new()
        })
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when the catalogue is empty (never, for a built catalogue)
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template at catalogue position `index`
    pub fn get(&self, index: usize) -> Option<&ChordTemplate> {
        self.templates.get(index)
    }

    /// Catalogue position of the template labelled `label`
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.label == label)
    }

    /// Templates in catalogue order
    pub fn iter(&self) -> std::slice::Iter<'_, ChordTemplate> {
        self.templates.iter()
    }
}

impl Default for ChordTemplates {
    fn default() -> Self {
        Self::new()
    }
}

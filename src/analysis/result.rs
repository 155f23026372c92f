//! Analysis result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label emitted for silent or harmonically empty spans
pub const NO_CHORD: &str = "N.C.";

/// Pitch class names, sharps only (0 = C, 1 = C#, ..., 11 = B)
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the 12 equal-tempered pitch classes, modulo octave
///
/// Serialized as its note name (e.g. `"F#"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    /// C, the default tonic
    pub const C: PitchClass = PitchClass(0);

    /// Create a pitch class, wrapping values outside 0-11
    pub fn new(index: usize) -> Self {
        PitchClass((index % 12) as u8)
    }

    /// Index 0-11
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Note name (sharps)
    pub fn name(&self) -> &'static str {
        PITCH_CLASS_NAMES[self.index()]
    }

    /// Parse a sharp-spelled note name (e.g. "C#")
    pub fn from_name(name: &str) -> Option<Self> {
        PITCH_CLASS_NAMES
            .iter()
            .position(|&n| n == name)
            .map(PitchClass::new)
    }

    /// Shift up by `semitones`, wrapping at the octave
    pub fn transpose(&self, semitones: usize) -> Self {
        PitchClass::new(self.index() + semitones)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

impl TryFrom<String> for PitchClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PitchClass::from_name(&value).ok_or_else(|| format!("unknown pitch class: {}", value))
    }
}

/// Tonal mode of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Major (Ionian)
    Major,
    /// Natural/harmonic minor
    Minor,
}

impl Mode {
    /// Lowercase name, as reported in the `scale` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// Estimated key of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// Tonic pitch class
    pub tonic: PitchClass,
    /// Major or minor
    pub mode: Mode,
}

impl KeyEstimate {
    /// Create a key estimate
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    /// Key name in musical notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use chordline::analysis::result::{KeyEstimate, Mode, PitchClass};
    ///
    /// assert_eq!(KeyEstimate::new(PitchClass::new(0), Mode::Major).name(), "C");
    /// assert_eq!(KeyEstimate::new(PitchClass::new(9), Mode::Minor).name(), "Am");
    /// ```
    pub fn name(&self) -> String {
        match self.mode {
            Mode::Major => self.tonic.name().to_string(),
            Mode::Minor => format!("{}m", self.tonic.name()),
        }
    }
}

impl Default for KeyEstimate {
    fn default() -> Self {
        Self::new(PitchClass::C, Mode::Major)
    }
}

/// A labelled chord span on the timeline
///
/// Also used for bar windows, which share the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSegment {
    /// Start time in seconds
    pub start: f32,
    /// End time in seconds (exclusive)
    pub end: f32,
    /// Chord label (e.g. "C", "Dmin7", "F#dim") or "N.C."
    pub chord: String,
    /// Match confidence (0.0-1.0)
    pub confidence: f32,
}

impl ChordSegment {
    /// Create a segment
    pub fn new(start: f32, end: f32, chord: impl Into<String>, confidence: f32) -> Self {
        Self {
            start,
            end,
            chord: chord.into(),
            confidence,
        }
    }

    /// A "no chord" segment with zero confidence
    pub fn no_chord(start: f32, end: f32) -> Self {
        Self::new(start, end, NO_CHORD, 0.0)
    }

    /// Whether this span carries the "N.C." sentinel
    pub fn is_no_chord(&self) -> bool {
        self.chord == NO_CHORD
    }

    /// Span length in seconds
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}

/// Complete analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tempo in BPM, rounded to 2 decimals (0 when unknown)
    pub tempo: f32,

    /// Tonic of the detected key
    pub key: PitchClass,

    /// Mode of the detected key
    pub scale: Mode,

    /// Chord timeline, ordered and non-overlapping
    pub chords: Vec<ChordSegment>,
}

impl AnalysisResult {
    /// Result reported for empty audio
    pub fn empty() -> Self {
        Self {
            tempo: 0.0,
            key: PitchClass::C,
            scale: Mode::Major,
            chords: vec![],
        }
    }

    /// Detected key as a single value
    pub fn key_estimate(&self) -> KeyEstimate {
        KeyEstimate::new(self.key, self.scale)
    }
}

/// Round a tempo to 2 decimal places for reporting
pub fn round_tempo(bpm: f32) -> f32 {
    if !bpm.is_finite() {
        return 0.0;
    }
    (bpm * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_names() {
        assert_eq!(PitchClass::new(0).name(), "C");
        assert_eq!(PitchClass::new(6).name(), "F#");
        assert_eq!(PitchClass::new(11).name(), "B");
        assert_eq!(PitchClass::new(13).name(), "C#");
    }

    #[test]
    fn test_pitch_class_from_name() {
        assert_eq!(PitchClass::from_name("A#"), Some(PitchClass::new(10)));
        assert_eq!(PitchClass::from_name("Bb"), None);
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(PitchClass::new(10).transpose(3), PitchClass::new(1));
    }

    #[test]
    fn test_key_name() {
        assert_eq!(KeyEstimate::new(PitchClass::new(1), Mode::Major).name(), "C#");
        assert_eq!(KeyEstimate::new(PitchClass::new(2), Mode::Minor).name(), "Dm");
        assert_eq!(KeyEstimate::default().name(), "C");
    }

    #[test]
    fn test_empty_result_serialization() {
        let json = serde_json::to_value(AnalysisResult::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tempo": 0.0, "key": "C", "scale": "major", "chords": []})
        );
    }

    #[test]
    fn test_result_roundtrip_through_json() {
        let result = AnalysisResult {
            tempo: 98.5,
            key: PitchClass::new(7),
            scale: Mode::Minor,
            chords: vec![ChordSegment::new(0.0, 2.0, "Gmin", 0.91)],
        };
        let text = serde_json::to_string(&result).unwrap();
        assert!(text.contains("\"key\":\"G\""));
        assert!(text.contains("\"scale\":\"minor\""));
        let back: AnalysisResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_round_tempo() {
        assert_eq!(round_tempo(123.456), 123.46);
        assert_eq!(round_tempo(0.0), 0.0);
        assert_eq!(round_tempo(f32::NAN), 0.0);
    }
}

//! Chord label normalization for external recognizers
//!
//! External models emit Harte-style labels such as `"G:maj7"` or `"D:min"`.
//! These are folded onto the catalogue vocabulary used by the template
//! matcher (`"Gmaj7"`, `"Dmin"`).

use crate::analysis::result::NO_CHORD;

/// Labels external models use for "no chord"
const NO_CHORD_LABELS: [&str; 3] = ["N", "X", NO_CHORD];

/// Simplify an external chord label to catalogue notation
///
/// Labels without a `root:quality` separator pass through unchanged. A
/// missing quality is treated as major; unrecognized qualities are appended
/// to the root verbatim.
///
/// # Example
///
/// ```
/// use chordline::ml::labels::simplify_chord_label;
///
/// assert_eq!(simplify_chord_label("C:maj"), "C");
/// assert_eq!(simplify_chord_label("A:min7"), "Amin7");
/// assert_eq!(simplify_chord_label("X"), "N.C.");
/// ```
pub fn simplify_chord_label(label: &str) -> String {
    if NO_CHORD_LABELS.contains(&label) {
        return NO_CHORD.to_string();
    }

    let mut parts = label.split(':');
    let root = match parts.next() {
        Some(root) if label.contains(':') => root,
        _ => return label.to_string(),
    };
    let quality = parts.next().unwrap_or("maj");

    match quality {
        "maj" | "major" => root.to_string(),
        "min" | "minor" => format!("{}min", root),
        "dim" | "diminished" => format!("{}dim", root),
        "aug" | "augmented" => format!("{}aug", root),
        q if q.contains('7') => {
            if q.contains("maj7") || q.contains("M7") {
                format!("{}maj7", root)
            } else if q.contains("min7") || q.contains("m7") {
                format!("{}min7", root)
            } else {
                format!("{}7", root)
            }
        }
        q if q.contains("sus2") => format!("{}sus2", root),
        q if q.contains("sus4") => format!("{}sus4", root),
        q => format!("{}{}", root, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_chord_labels() {
        for label in ["N", "X", "N.C."] {
            assert_eq!(simplify_chord_label(label), NO_CHORD);
        }
    }

    #[test]
    fn test_triads() {
        assert_eq!(simplify_chord_label("C:maj"), "C");
        assert_eq!(simplify_chord_label("F#:major"), "F#");
        assert_eq!(simplify_chord_label("D:min"), "Dmin");
        assert_eq!(simplify_chord_label("Eb:minor"), "Ebmin");
        assert_eq!(simplify_chord_label("B:dim"), "Bdim");
        assert_eq!(simplify_chord_label("G:diminished"), "Gdim");
        assert_eq!(simplify_chord_label("A:aug"), "Aaug");
        assert_eq!(simplify_chord_label("A:augmented"), "Aaug");
    }

    #[test]
    fn test_sevenths() {
        assert_eq!(simplify_chord_label("G:maj7"), "Gmaj7");
        assert_eq!(simplify_chord_label("G:M7"), "Gmaj7");
        assert_eq!(simplify_chord_label("A:min7"), "Amin7");
        assert_eq!(simplify_chord_label("A:m7"), "Amin7");
        assert_eq!(simplify_chord_label("E:7"), "E7");
        // "hdim7" contains "m7"
        assert_eq!(simplify_chord_label("B:hdim7"), "Bmin7");
    }

    #[test]
    fn test_suspended() {
        assert_eq!(simplify_chord_label("D:sus2"), "Dsus2");
        assert_eq!(simplify_chord_label("D:sus4"), "Dsus4");
        assert_eq!(simplify_chord_label("D:sus"), "Dsus");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(simplify_chord_label("Cmin"), "Cmin");
        assert_eq!(simplify_chord_label("C:6"), "C6");
        assert_eq!(simplify_chord_label("C:"), "C");
    }
}

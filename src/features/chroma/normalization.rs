//! Chroma normalization and averaging helpers

use super::{ChromaVector, N_PITCH_CLASSES};

/// Guard added to norms before division
pub const NORM_EPSILON: f32 = 1e-9;

/// Dot product of two chroma vectors
pub fn dot(a: &ChromaVector, b: &ChromaVector) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean (L2) norm
pub fn l2_norm(v: &ChromaVector) -> f32 {
    dot(v, v).sqrt()
}

/// Scale to unit L2 norm, dividing by `norm + NORM_EPSILON`
///
/// A zero vector stays zero.
pub fn normalize_l2(v: &ChromaVector) -> ChromaVector {
    let norm = l2_norm(v) + NORM_EPSILON;
    let mut out = *v;
    for x in out.iter_mut() {
        *x /= norm;
    }
    out
}

/// Mean of a run of chroma frames
///
/// Returns the zero vector for an empty slice.
pub fn mean_chroma(frames: &[ChromaVector]) -> ChromaVector {
    let mut mean = [0.0f32; N_PITCH_CLASSES];
    if frames.is_empty() {
        return mean;
    }
    for frame in frames {
        for (acc, &x) in mean.iter_mut().zip(frame.iter()) {
            *acc += x;
        }
    }
    let n = frames.len() as f32;
    for x in mean.iter_mut() {
        *x /= n;
    }
    mean
}

/// Rotate a 12-element profile so that index 0 lands on `shift`
///
/// `rotated[i] = profile[(i + 12 - shift) % 12]`, the same convention as a
/// circular roll to the right.
pub fn rotate(profile: &ChromaVector, shift: usize) -> ChromaVector {
    let mut out = [0.0f32; N_PITCH_CLASSES];
    for (i, x) in out.iter_mut().enumerate() {
        *x = profile[(i + N_PITCH_CLASSES - shift % N_PITCH_CLASSES) % N_PITCH_CLASSES];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product() {
        let mut a = [0.0f32; 12];
        let mut b = [0.0f32; 12];
        a[0] = 1.0;
        a[1] = 2.0;
        a[2] = 3.0;
        b[0] = 4.0;
        b[1] = 5.0;
        b[2] = 6.0;
        assert_eq!(dot(&a, &b), 32.0);
    }

    #[test]
    fn test_normalize_l2_unit_norm() {
        let mut v = [0.0f32; 12];
        v[0] = 3.0;
        v[4] = 4.0;
        let n = normalize_l2(&v);
        assert!((l2_norm(&n) - 1.0).abs() < 1e-6);
        assert!((n[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let n = normalize_l2(&[0.0; 12]);
        assert!(n.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_mean_chroma() {
        let mut a = [0.0f32; 12];
        let mut b = [0.0f32; 12];
        a[0] = 1.0;
        b[0] = 3.0;
        b[5] = 2.0;
        let m = mean_chroma(&[a, b]);
        assert_eq!(m[0], 2.0);
        assert_eq!(m[5], 1.0);
        assert_eq!(mean_chroma(&[]), [0.0; 12]);
    }

    #[test]
    fn test_rotate() {
        let mut p = [0.0f32; 12];
        p[0] = 1.0;
        p[4] = 0.5;
        let r = rotate(&p, 2);
        assert_eq!(r[2], 1.0);
        assert_eq!(r[6], 0.5);
        assert_eq!(rotate(&p, 12), p);
    }
}

//! Temporal chroma smoothing

use super::{ChromaVector, N_PITCH_CLASSES};

/// Median-filter each pitch class along the time axis
///
/// Boundaries are handled by mirroring (`d c b a | a b c d | d c b a`), so the
/// output has the same length as the input. For even window sizes the upper
/// median is used.
///
/// # Arguments
///
/// * `chroma_vectors` - Chroma frames in time order
/// * `window_size` - Filter length in frames (e.g., 7); 0 or 1 disables smoothing
///
/// # Returns
///
/// Smoothed chroma frames
pub fn median_filter(chroma_vectors: &[ChromaVector], window_size: usize) -> Vec<ChromaVector> {
    let n = chroma_vectors.len();
    if window_size <= 1 || n == 0 {
        return chroma_vectors.to_vec();
    }

    log::debug!(
        "Median filtering {} chroma vectors with window size {}",
        n,
        window_size
    );

    // Centred window: `before` frames back, the rest forward
    let before = window_size / 2;
    let mut window = Vec::with_capacity(window_size);
    let mut out = vec![[0.0f32; N_PITCH_CLASSES]; n];

    for (t, frame_out) in out.iter_mut().enumerate() {
        for (pc, value) in frame_out.iter_mut().enumerate() {
            window.clear();
            for k in 0..window_size {
                let idx = mirror_index(t as isize + k as isize - before as isize, n);
                window.push(chroma_vectors[idx][pc]);
            }
            window.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            *value = window[window_size / 2];
        }
    }

    out
}

/// Map an out-of-range index back into `0..n` by half-sample reflection
fn mirror_index(mut i: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(values: &[f32]) -> Vec<ChromaVector> {
        values
            .iter()
            .map(|&v| {
                let mut f = [0.0f32; 12];
                f[0] = v;
                f
            })
            .collect()
    }

    #[test]
    fn test_removes_single_frame_spike() {
        let input = frames(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        let out = median_filter(&input, 3);
        assert!(out.iter().all(|f| f[0] == 0.0));
    }

    #[test]
    fn test_constant_signal_unchanged() {
        let input = frames(&[0.4; 10]);
        let out = median_filter(&input, 7);
        assert_eq!(out, input);
    }

    #[test]
    fn test_preserves_length_for_short_input() {
        let input = frames(&[0.1, 0.9]);
        let out = median_filter(&input, 7);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_window_one_is_identity() {
        let input = frames(&[0.1, 0.5, 0.2]);
        assert_eq!(median_filter(&input, 1), input);
    }

    #[test]
    fn test_mirror_index() {
        assert_eq!(mirror_index(-1, 5), 0);
        assert_eq!(mirror_index(-3, 5), 2);
        assert_eq!(mirror_index(5, 5), 4);
        assert_eq!(mirror_index(7, 5), 2);
        assert_eq!(mirror_index(-4, 2), 0);
    }
}

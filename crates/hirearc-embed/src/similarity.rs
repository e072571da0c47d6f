//! Cosine similarity over pre-normalized `f64` vectors.
//!
//! Vectors produced by [`crate::engine::EmbeddingEngine`] are already
//! L2-normalized, so in principle a plain dot product suffices. These
//! helpers divide by the norms anyway and clamp the result, so callers
//! holding externally-sourced vectors (e.g. round-tripped through storage)
//! get a defined answer rather than a value drifted slightly outside
//! `[0, 1]` by floating-point error.

/// Cosine similarity between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns `0.0` if either vector is all-zero (no direction to compare) or
/// if the vectors have mismatched lengths.
#[must_use]
pub fn cos(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Pairwise cosine similarity, `result[i][j] = cos(a[i], b[j])`.
#[must_use]
pub fn cos_matrix(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    a.iter()
        .map(|row_a| b.iter().map(|row_b| cos(row_a, row_b)).collect())
        .collect()
}

/// Scale `v` to unit L2 norm in place. A zero vector is left unchanged.
pub fn normalize_l2(v: &mut [f64]) {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v {
            *x /= norm;
        }
    }
}

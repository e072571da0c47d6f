//! Cosine similarity and cost-matrix construction over bundle vectors.
//!
//! Bundle vectors are already unit-norm by the time they reach this crate
//! (enforced by [`hirearc_core::Bundle::validate`]), so cosine similarity
//! reduces to a dot product; the explicit norm division below is kept
//! anyway so this helper is correct even if a caller passes un-normalized
//! vectors (e.g. a title vector computed ad hoc for an unsaved JD).

use crate::error::MatchError;

/// Cosine similarity between two same-length vectors, clamped to `[0, 1]`.
pub fn cos(a: &[f64], b: &[f64]) -> Result<f64, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::Dimension {
            jd_dim: a.len(),
            cv_dim: b.len(),
        });
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a * norm_b)).clamp(0.0, 1.0))
}

/// Full pairwise cosine-similarity matrix, `matrix[jd_idx][cv_idx]`.
pub fn similarity_matrix(jd: &[Vec<f64>], cv: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, MatchError> {
    jd.iter()
        .map(|j| cv.iter().map(|c| cos(j, c)).collect::<Result<Vec<_>, _>>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_vectors_are_similarity_one() {
        let v = vec![0.6, 0.8];
        assert!((cos(&v, &v).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn orthogonal_vectors_are_zero() {
        assert_eq!(cos(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_lengths_error() {
        let err = cos(&[1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, MatchError::Dimension { .. }));
    }

    #[test]
    fn zero_vector_is_zero_similarity() {
        assert_eq!(cos(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn matrix_has_jd_rows_and_cv_columns() {
        let jd = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let cv = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.7071, 0.7071]];
        let m = similarity_matrix(&jd, &cv).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].len(), 3);
    }
}

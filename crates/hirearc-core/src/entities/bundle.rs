use serde::{Deserialize, Serialize};

use crate::consts::{EMBEDDING_DIM, NORM_EPSILON, RESPONSIBILITIES_COUNT, SKILLS_COUNT};
use crate::errors::{CoreError, ErrorKind};

/// The fixed-shape `(20, 10, 1, 1)` collection of unit-norm vectors
/// representing one document.
///
/// Sizes are exactly `(SKILLS_COUNT, RESPONSIBILITIES_COUNT, 1, 1)`; any
/// deviation reaching [`Bundle::validate`] is treated as a shape error, not a
/// panic — deviations can arrive from an untrusted store read even though
/// producing one is a programmer error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bundle {
    pub skill_vectors: Vec<Vec<f64>>,
    pub responsibility_vectors: Vec<Vec<f64>>,
    pub experience_vector: Vec<f64>,
    pub job_title_vector: Vec<f64>,
}

impl Bundle {
    /// Verify the `(20, 10, 1, 1)` shape, per-vector dimension, and the
    /// unit-norm invariant (`‖v‖₂ ∈ [1 - ε, 1 + ε]`).
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.skill_vectors.len() != SKILLS_COUNT {
            return Err(CoreError::new(
                ErrorKind::Shape,
                format!(
                    "expected {SKILLS_COUNT} skill vectors, got {}",
                    self.skill_vectors.len()
                ),
            ));
        }
        if self.responsibility_vectors.len() != RESPONSIBILITIES_COUNT {
            return Err(CoreError::new(
                ErrorKind::Shape,
                format!(
                    "expected {RESPONSIBILITIES_COUNT} responsibility vectors, got {}",
                    self.responsibility_vectors.len()
                ),
            ));
        }

        for v in self
            .skill_vectors
            .iter()
            .chain(self.responsibility_vectors.iter())
            .chain(std::iter::once(&self.experience_vector))
            .chain(std::iter::once(&self.job_title_vector))
        {
            validate_vector(v)?;
        }

        Ok(())
    }

    /// Total vector count; always 32 for a bundle that passes [`Self::validate`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.skill_vectors.len() + self.responsibility_vectors.len() + 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_vector(v: &[f64]) -> Result<(), CoreError> {
    if v.len() != EMBEDDING_DIM {
        return Err(CoreError::new(
            ErrorKind::Shape,
            format!("expected dimension {EMBEDDING_DIM}, got {}", v.len()),
        ));
    }
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if !(1.0 - NORM_EPSILON..=1.0 + NORM_EPSILON).contains(&norm) {
        return Err(CoreError::new(
            ErrorKind::Shape,
            format!("vector norm {norm} outside [1 - eps, 1 + eps]"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_vector() -> Vec<f64> {
        let mut v = vec![0.0; EMBEDDING_DIM];
        v[0] = 1.0;
        v
    }

    fn valid_bundle() -> Bundle {
        Bundle {
            skill_vectors: (0..SKILLS_COUNT).map(|_| unit_vector()).collect(),
            responsibility_vectors: (0..RESPONSIBILITIES_COUNT).map(|_| unit_vector()).collect(),
            experience_vector: unit_vector(),
            job_title_vector: unit_vector(),
        }
    }

    #[test]
    fn valid_bundle_passes() {
        assert!(valid_bundle().validate().is_ok());
        assert_eq!(valid_bundle().len(), 32);
    }

    #[test]
    fn wrong_skill_count_is_shape_error() {
        let mut b = valid_bundle();
        b.skill_vectors.pop();
        let err = b.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn wrong_dimension_is_shape_error() {
        let mut b = valid_bundle();
        b.job_title_vector.push(0.0);
        assert_eq!(b.validate().unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn non_unit_norm_is_shape_error() {
        let mut b = valid_bundle();
        b.experience_vector[0] = 2.0;
        assert_eq!(b.validate().unwrap_err().kind(), ErrorKind::Shape);
    }
}

//! Sub-score weight normalization.

use hirearc_core::DEFAULT_WEIGHTS;

/// Normalized `(skills, responsibilities, title, experience)` weights,
/// guaranteed to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub skills: f64,
    pub responsibilities: f64,
    pub title: f64,
    pub experience: f64,
}

impl Weights {
    /// Normalize a caller-supplied weight vector to sum to 1. If the sum is
    /// `<= 0`, fall back to [`DEFAULT_WEIGHTS`] (already normalized).
    #[must_use]
    pub fn normalize(raw: (f64, f64, f64, f64)) -> Self {
        let sum = raw.0 + raw.1 + raw.2 + raw.3;
        if sum <= 0.0 {
            let (s, r, t, e) = DEFAULT_WEIGHTS;
            return Self {
                skills: s,
                responsibilities: r,
                title: t,
                experience: e,
            };
        }
        Self {
            skills: raw.0 / sum,
            responsibilities: raw.1 / sum,
            title: raw.2 / sum,
            experience: raw.3 / sum,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::normalize(DEFAULT_WEIGHTS)
    }
}

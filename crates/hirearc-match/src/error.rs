//! Match engine errors.

use hirearc_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// A bundle has the wrong skill/responsibility count.
    #[error("bundle shape error: {0}")]
    Shape(String),

    /// JD and CV vectors for the same item class have different dimensions.
    #[error("dimension mismatch: jd={jd_dim}, cv={cv_dim}")]
    Dimension { jd_dim: usize, cv_dim: usize },
}

impl MatchError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Shape(_) => ErrorKind::Shape,
            Self::Dimension { .. } => ErrorKind::InvalidInput,
        }
    }
}

//! Error type for the embedding engine.

use hirearc_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    /// The ONNX model failed to load or initialize. Fatal at startup.
    #[error("failed to initialize embedding model: {0}")]
    ModelInit(String),

    /// Attempted to embed an empty batch or an all-blank text.
    #[error("cannot embed empty input")]
    EmptyInput,

    /// The model returned a vector whose dimensionality doesn't match what
    /// the rest of the system expects.
    #[error("embedding has {actual} dimensions, expected {expected}")]
    Shape { expected: usize, actual: usize },

    /// The underlying fastembed call failed for a text batch.
    #[error("embedding call failed: {0}")]
    EmbedFailed(String),
}

impl EmbedError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ModelInit(_) => ErrorKind::ModelInit,
            Self::EmptyInput => ErrorKind::InvalidInput,
            Self::Shape { .. } => ErrorKind::Shape,
            Self::EmbedFailed(_) => ErrorKind::Transient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_as_expected() {
        assert_eq!(EmbedError::EmptyInput.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            EmbedError::Shape {
                expected: 768,
                actual: 384
            }
            .kind(),
            ErrorKind::Shape
        );
        assert_eq!(
            EmbedError::ModelInit("boom".into()).kind(),
            ErrorKind::ModelInit
        );
    }
}

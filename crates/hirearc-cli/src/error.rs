//! The converging error type every crate's own error funnels into. Lives
//! here rather than in `hirearc-core` because every other crate depends on
//! `hirearc-core`, not the reverse (see `DESIGN.md`).

use hirearc_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HirearcError {
    #[error(transparent)]
    Config(#[from] hirearc_config::ConfigError),

    #[error(transparent)]
    Embed(#[from] hirearc_embed::EmbedError),

    #[error(transparent)]
    Store(#[from] hirearc_store::StoreError),

    #[error(transparent)]
    Match(#[from] hirearc_match::MatchError),

    #[error(transparent)]
    Pipeline(#[from] hirearc_pipeline::PipelineError),

    #[error(transparent)]
    Queue(#[from] hirearc_queue::QueueError),

    #[error(transparent)]
    RateLimit(#[from] hirearc_ratelimit::RateLimitError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("job {0} not found")]
    JobNotFound(String),
}

impl HirearcError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Internal,
            Self::Embed(e) => e.kind(),
            Self::Store(e) => e.kind(),
            Self::Match(e) => e.kind(),
            Self::Pipeline(e) => e.kind(),
            Self::Queue(e) => e.kind(),
            Self::RateLimit(e) => e.kind(),
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::JobNotFound(_) => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_invalid_input_kind() {
        let err = HirearcError::InvalidInput("bad weights".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn job_not_found_maps_to_not_found_kind() {
        let err = HirearcError::JobNotFound("abc".to_string());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

//! Ingestion pipeline errors, each tagged with the offending step so a
//! permanently-failed job can record exactly where it stopped (per §4.4).

use hirearc_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("JD not found: {0}")]
    JdNotFound(String),

    #[error("JD {0} is not accepting applications")]
    AcceptanceClosed(String),

    #[error("parser failed: {0}")]
    Parse(String),

    #[error("standardizer failed: {0}")]
    Standardize(String),

    #[error("embedding failed: {0}")]
    Embed(#[from] hirearc_embed::EmbedError),

    #[error("store failed: {0}")]
    Store(#[from] hirearc_store::StoreError),

    #[error("partial persist failure in collections: {failed:?}")]
    PartialPersist { failed: Vec<&'static str> },

    #[error("metadata link failed: {0}")]
    Link(String),
}

impl PipelineError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::JdNotFound(_) => ErrorKind::NotFound,
            Self::AcceptanceClosed(_) => ErrorKind::InvalidInput,
            Self::Parse(_) | Self::Standardize(_) | Self::Link(_) => ErrorKind::Upstream,
            Self::Embed(e) => e.kind(),
            Self::Store(e) => e.kind(),
            Self::PartialPersist { .. } => ErrorKind::Internal,
        }
    }

    /// The pipeline step this error occurred in, for the job record (§4.4,
    /// §7: "the job result records the offending step").
    #[must_use]
    pub const fn step(&self) -> &'static str {
        match self {
            Self::JdNotFound(_) | Self::AcceptanceClosed(_) => "resolve_jd",
            Self::Parse(_) => "parse",
            Self::Standardize(_) => "standardize",
            Self::Embed(_) => "embed",
            Self::Store(_) | Self::PartialPersist { .. } => "persist",
            Self::Link(_) => "link",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jd_not_found_maps_to_not_found_and_resolve_step() {
        let err = PipelineError::JdNotFound("jd-token".into());
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.step(), "resolve_jd");
    }

    #[test]
    fn partial_persist_maps_to_internal_and_persist_step() {
        let err = PipelineError::PartialPersist {
            failed: vec!["structured"],
        };
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.step(), "persist");
    }
}

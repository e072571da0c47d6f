//! Store error types.

use hirearc_core::{DocumentKind, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No record for this id/kind in the requested collection.
    #[error("{collection} record not found for {kind} document {id}")]
    NotFound {
        collection: &'static str,
        kind: DocumentKind,
        id: String,
    },

    /// A stored bundle doesn't have the expected `(20, 10, 1, 1)` shape.
    #[error("stored bundle has wrong shape: {0}")]
    Shape(String),

    /// `delete` removed some but not all of a document's three collection
    /// records; the failures are logged individually before this is raised.
    #[error("partial delete failure for {kind} document {id}: {failed:?}")]
    PartialDelete {
        kind: DocumentKind,
        id: String,
        failed: Vec<&'static str>,
    },

    /// The underlying DuckDB backend failed after exhausting bounded retries.
    #[error("DuckDB backend error: {0}")]
    Backend(#[from] duckdb::Error),

    /// Failed to (de)serialize a JSON payload column.
    #[error("payload serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Shape(_) => ErrorKind::Shape,
            Self::PartialDelete { .. } | Self::Io(_) => ErrorKind::Internal,
            Self::Backend(_) | Self::Serde(_) => ErrorKind::Upstream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found_kind() {
        let err = StoreError::NotFound {
            collection: "embeddings",
            kind: DocumentKind::Cv,
            id: "abc".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn shape_maps_to_shape_kind() {
        assert_eq!(StoreError::Shape("bad".into()).kind(), ErrorKind::Shape);
    }
}

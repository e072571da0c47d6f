//! Row types returned by the `documents` and `scroll` operations.

use chrono::{DateTime, Utc};
use hirearc_core::DocumentKind;
use serde::{Deserialize, Serialize};

/// Raw text and file metadata for one document, as written by
/// [`crate::VectorStore::put_document`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    pub filename: String,
    pub format: String,
    pub raw_text: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_uri: Option<String>,
    pub mime: Option<String>,
}

/// One entry in a [`crate::VectorStore::scroll`] listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEntry {
    pub id: String,
    pub kind: DocumentKind,
    /// A short human-readable summary (the document's filename).
    pub summary: String,
}

//! The three external collaborators the ingestion pipeline orchestrates but
//! does not implement: file parsing, LLM-backed standardization, and JD
//! metadata/acceptance lookups. Concrete implementations live outside this
//! crate's scope; this module only defines the seam.

use async_trait::async_trait;
use hirearc_core::{DocumentId, DocumentKind, StandardizedInfo};
use serde_json::Value;

use crate::error::PipelineError;

/// Raw and cleaned text extracted from an uploaded file, plus any PII the
/// parser pulled out separately from the body text.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub clean_text: String,
    pub raw_text: String,
    pub format: String,
    pub pii: Option<Value>,
}

/// Extracts text and PII from an uploaded CV or JD file.
#[async_trait]
pub trait Parser: Send + Sync {
    async fn parse(&self, file_ref: &str) -> Result<ParsedDocument, PipelineError>;
}

/// Turns cleaned text into a [`StandardizedInfo`] record (skills,
/// responsibilities, title, experience). Must always return exactly 20
/// skills and 10 responsibilities; this crate re-normalizes defensively via
/// [`StandardizedInfo::new`] regardless.
#[async_trait]
pub trait Standardizer: Send + Sync {
    async fn standardize(
        &self,
        clean_text: &str,
        filename: &str,
        kind: DocumentKind,
    ) -> Result<StandardizedInfo, PipelineError>;
}

/// A JD's acceptance state, as known to the metadata store.
#[derive(Debug, Clone, Copy)]
pub struct JdMeta {
    pub jd_id: DocumentId,
    pub accepting: bool,
}

/// Resolves JD tokens and records application-to-JD links. Backed by
/// whatever system of record owns job postings; out of scope here.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn resolve_jd(&self, jd_token: &str) -> Result<JdMeta, PipelineError>;

    async fn link_application(
        &self,
        application_id: DocumentId,
        jd_id: DocumentId,
    ) -> Result<(), PipelineError>;
}

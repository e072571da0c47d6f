//! Concrete implementations of `hirearc-pipeline`'s three out-of-scope
//! collaborator traits (`Parser`, `Standardizer`, `MetadataStore`).
//!
//! These are local stand-ins, not production backends: a real deployment
//! swaps them for an LLM-backed standardizer, a PDF/DOCX parser, and a JD
//! system of record. They exist so this binary can actually run end to end
//! against plain-text files without depending on an external service.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use hirearc_core::{DocumentId, DocumentKind, StandardizedInfo};
use hirearc_pipeline::{JdMeta, MetadataStore, Parser, ParsedDocument, PipelineError, Standardizer};

/// Reads a file from local disk and treats its contents as clean text.
/// `cv_file_ref`/JD file references are plain filesystem paths in this
/// binary (a real deployment would resolve an object-storage URI instead).
pub struct FileParser;

#[async_trait]
impl Parser for FileParser {
    async fn parse(&self, file_ref: &str) -> Result<ParsedDocument, PipelineError> {
        let raw_text = tokio::fs::read_to_string(file_ref)
            .await
            .map_err(|e| PipelineError::Parse(format!("reading {file_ref}: {e}")))?;
        let format = std::path::Path::new(file_ref)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("txt")
            .to_string();

        Ok(ParsedDocument {
            clean_text: raw_text.clone(),
            raw_text,
            format,
            pii: None,
        })
    }
}

/// A regex/heuristic standardizer: first non-empty line is the title,
/// "N years ... experience" gives the experience count, and the remaining
/// non-empty lines are split between skills and responsibilities.
///
/// [`StandardizedInfo::new`] pads/truncates both lists to their canonical
/// counts regardless of how many lines this produces.
pub struct HeuristicStandardizer;

#[async_trait]
impl Standardizer for HeuristicStandardizer {
    async fn standardize(
        &self,
        clean_text: &str,
        _filename: &str,
        _kind: DocumentKind,
    ) -> Result<StandardizedInfo, PipelineError> {
        let mut lines = clean_text.lines().map(str::trim).filter(|l| !l.is_empty());
        let title = lines.next().unwrap_or_default().to_string();
        let body: Vec<&str> = lines.collect();

        let experience_years = extract_years_of_experience(clean_text);
        let (skills, responsibilities) = body.split_at(body.len() / 2);

        Ok(StandardizedInfo::new(
            title,
            experience_years,
            skills.iter().map(|s| (*s).to_string()).collect(),
            responsibilities.iter().map(|s| (*s).to_string()).collect(),
            None,
            Default::default(),
        ))
    }
}

/// Matches "N years of experience" / "N+ years experience", case-insensitive.
fn extract_years_of_experience(text: &str) -> u32 {
    let lower = text.to_lowercase();
    for (idx, _) in lower.match_indices("year") {
        let prefix = lower[..idx].trim_end().trim_end_matches('+');
        if let Some(digits) = prefix.rsplit(|c: char| !c.is_ascii_digit()).next() {
            if let Ok(years) = digits.parse() {
                return years;
            }
        }
    }
    0
}

/// In-process JD registry: `register` (driven by the `register-jd` CLI
/// command) stands in for whatever system of record owns job postings.
/// Unknown tokens resolve as `NotFound` rather than defaulting to open, so
/// `submit` against a typo'd token fails the way a real lookup would.
pub struct InMemoryMetadataStore {
    jds: Mutex<HashMap<String, JdMeta>>,
}

impl InMemoryMetadataStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            jds: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, jd_token: String, jd_id: DocumentId, accepting: bool) {
        self.jds
            .lock()
            .expect("metadata store mutex poisoned")
            .insert(jd_token, JdMeta { jd_id, accepting });
    }
}

impl Default for InMemoryMetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn resolve_jd(&self, jd_token: &str) -> Result<JdMeta, PipelineError> {
        self.jds
            .lock()
            .expect("metadata store mutex poisoned")
            .get(jd_token)
            .copied()
            .ok_or_else(|| PipelineError::JdNotFound(jd_token.to_string()))
    }

    async fn link_application(&self, _application_id: DocumentId, _jd_id: DocumentId) -> Result<(), PipelineError> {
        Ok(())
    }
}

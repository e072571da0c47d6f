//! `IngestionPipeline`: orchestrates one application submission from raw
//! input to a persisted bundle, per §4.4's five operations.

use std::sync::Arc;

use hirearc_core::{ApplicationData, DocumentId, DocumentKind, JobId};
use hirearc_embed::EmbeddingEngine;
use hirearc_store::{DocumentRecord, VectorStore};
use serde_json::Value;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::traits::{MetadataStore, Parser, Standardizer};

/// Orchestrates parse -> standardize -> embed -> persist -> link for one
/// application. Generic over the three out-of-scope collaborators so this
/// crate never depends on a concrete parser/standardizer/metadata backend.
pub struct IngestionPipeline<P, S, M> {
    parser: Arc<P>,
    standardizer: Arc<S>,
    metadata: Arc<M>,
    embed: Arc<EmbeddingEngine>,
    store: Arc<VectorStore>,
}

impl<P, S, M> IngestionPipeline<P, S, M>
where
    P: Parser + 'static,
    S: Standardizer + 'static,
    M: MetadataStore + 'static,
{
    pub fn new(
        parser: Arc<P>,
        standardizer: Arc<S>,
        metadata: Arc<M>,
        embed: Arc<EmbeddingEngine>,
        store: Arc<VectorStore>,
    ) -> Self {
        Self {
            parser,
            standardizer,
            metadata,
            embed,
            store,
        }
    }

    /// Process one application submission.
    ///
    /// `job_id` doubles as the persisted CV's [`DocumentId`]: re-processing
    /// the same job (a queue retry) targets the same id, so all writes
    /// overwrite prior partial state rather than creating duplicates, per
    /// §4.4's idempotency requirement.
    pub async fn process(
        &self,
        job_id: JobId,
        application_data: &ApplicationData,
    ) -> Result<DocumentId, PipelineError> {
        let cv_id = DocumentId::from_uuid(*job_id.as_uuid());

        // Step 1: resolve the JD and verify acceptance is open.
        let jd_meta = self.metadata.resolve_jd(&application_data.jd_token).await?;
        if !jd_meta.accepting {
            return Err(PipelineError::AcceptanceClosed(application_data.jd_token.clone()));
        }

        // Step 2: parse the uploaded file.
        let parsed = self.parser.parse(&application_data.cv_file_ref).await?;

        // Step 3: standardize, then merge extracted PII into contact_info.
        let mut info = self
            .standardizer
            .standardize(&parsed.clean_text, &application_data.cv_file_ref, DocumentKind::Cv)
            .await?;
        info.contact_info = merge_contact_info(info.contact_info.take(), parsed.pii.clone());

        // Step 4: embed (CPU-bound and synchronous; dispatch off the runtime).
        let embed = Arc::clone(&self.embed);
        let info_for_embed = info.clone();
        let bundle = tokio::task::spawn_blocking(move || embed.embed_document(&info_for_embed))
            .await
            .expect("embedding task panicked")?;

        // Step 5: three independent writes, issued concurrently. A partial
        // failure is an overall failure; best-effort cleanup removes
        // whatever did succeed so a retry starts from a clean slate.
        let record = DocumentRecord {
            filename: application_data.cv_file_ref.clone(),
            format: parsed.format.clone(),
            raw_text: parsed.raw_text.clone(),
            uploaded_at: chrono::Utc::now(),
            file_uri: Some(application_data.cv_file_ref.clone()),
            mime: None,
        };

        let (doc_res, structured_res, bundle_res) = tokio::join!(
            spawn_put_document(Arc::clone(&self.store), cv_id, record),
            spawn_put_structured(Arc::clone(&self.store), cv_id, info),
            spawn_put_bundle(Arc::clone(&self.store), cv_id, bundle),
        );

        let mut failed = Vec::new();
        if doc_res.is_err() {
            failed.push("documents");
        }
        if structured_res.is_err() {
            failed.push("structured");
        }
        if bundle_res.is_err() {
            failed.push("embeddings");
        }

        if !failed.is_empty() {
            let store = Arc::clone(&self.store);
            let cleanup = tokio::task::spawn_blocking(move || store.delete(cv_id, DocumentKind::Cv))
                .await
                .expect("cleanup task panicked");
            if let Err(e) = cleanup {
                error!(error = %e, "best-effort cleanup after partial persist failed");
            }
            return Err(PipelineError::PartialPersist { failed });
        }

        // Step 6: link the application to the JD.
        self.metadata.link_application(cv_id, jd_meta.jd_id).await?;

        info!(cv_id = %cv_id, jd_id = %jd_meta.jd_id, "application ingested");
        Ok(cv_id)
    }
}

fn merge_contact_info(standardizer: Option<Value>, parser_pii: Option<Value>) -> Option<Value> {
    match (standardizer, parser_pii) {
        (Some(Value::Object(mut a)), Some(Value::Object(b))) => {
            for (k, v) in b {
                a.entry(k).or_insert(v);
            }
            Some(Value::Object(a))
        }
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(a), Some(_)) => Some(a),
        (None, None) => None,
    }
}

async fn spawn_put_document(
    store: Arc<VectorStore>,
    id: DocumentId,
    record: DocumentRecord,
) -> Result<(), hirearc_store::StoreError> {
    tokio::task::spawn_blocking(move || store.put_document(id, DocumentKind::Cv, &record))
        .await
        .expect("put_document task panicked")
}

async fn spawn_put_structured(
    store: Arc<VectorStore>,
    id: DocumentId,
    info: hirearc_core::StandardizedInfo,
) -> Result<(), hirearc_store::StoreError> {
    tokio::task::spawn_blocking(move || store.put_structured(id, DocumentKind::Cv, &info))
        .await
        .expect("put_structured task panicked")
}

async fn spawn_put_bundle(
    store: Arc<VectorStore>,
    id: DocumentId,
    bundle: hirearc_core::Bundle,
) -> Result<(), hirearc_store::StoreError> {
    tokio::task::spawn_blocking(move || store.put_bundle(id, DocumentKind::Cv, &bundle))
        .await
        .expect("put_bundle task panicked")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{JdMeta, ParsedDocument};
    use async_trait::async_trait;
    use hirearc_core::Priority;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    struct FakeParser;
    #[async_trait]
    impl Parser for FakeParser {
        async fn parse(&self, file_ref: &str) -> Result<ParsedDocument, PipelineError> {
            Ok(ParsedDocument {
                clean_text: format!("clean text for {file_ref}"),
                raw_text: format!("raw text for {file_ref}"),
                format: "pdf".to_string(),
                pii: Some(serde_json::json!({"email": "a@example.com"})),
            })
        }
    }

    struct FakeStandardizer;
    #[async_trait]
    impl Standardizer for FakeStandardizer {
        async fn standardize(
            &self,
            _clean_text: &str,
            _filename: &str,
            _kind: DocumentKind,
        ) -> Result<hirearc_core::StandardizedInfo, PipelineError> {
            Ok(hirearc_core::StandardizedInfo::new(
                "Engineer",
                5,
                vec!["Rust".to_string()],
                vec!["Build things".to_string()],
                None,
                Default::default(),
            ))
        }
    }

    struct FakeMetadata {
        jd_id: DocumentId,
        accepting: bool,
        link_calls: StdMutex<Vec<(DocumentId, DocumentId)>>,
    }

    #[async_trait]
    impl MetadataStore for FakeMetadata {
        async fn resolve_jd(&self, _jd_token: &str) -> Result<JdMeta, PipelineError> {
            Ok(JdMeta {
                jd_id: self.jd_id,
                accepting: self.accepting,
            })
        }

        async fn link_application(
            &self,
            application_id: DocumentId,
            jd_id: DocumentId,
        ) -> Result<(), PipelineError> {
            self.link_calls.lock().unwrap().push((application_id, jd_id));
            Ok(())
        }
    }

    fn app_data() -> ApplicationData {
        ApplicationData {
            applicant_id: "applicant-1".to_string(),
            jd_token: "jd-token".to_string(),
            cv_file_ref: "s3://bucket/cv.pdf".to_string(),
            priority_hint: Some(Priority::Normal),
            metadata: Value::Null,
        }
    }

    #[tokio::test]
    async fn acceptance_closed_short_circuits_before_parsing() {
        static PARSE_CALLS: AtomicUsize = AtomicUsize::new(0);

        struct CountingParser;
        #[async_trait]
        impl Parser for CountingParser {
            async fn parse(&self, file_ref: &str) -> Result<ParsedDocument, PipelineError> {
                PARSE_CALLS.fetch_add(1, Ordering::SeqCst);
                Ok(ParsedDocument {
                    clean_text: file_ref.to_string(),
                    raw_text: file_ref.to_string(),
                    format: "pdf".to_string(),
                    pii: None,
                })
            }
        }

        let pipeline = IngestionPipeline::new(
            Arc::new(CountingParser),
            Arc::new(FakeStandardizer),
            Arc::new(FakeMetadata {
                jd_id: DocumentId::new(),
                accepting: false,
                link_calls: StdMutex::new(Vec::new()),
            }),
            Arc::new(EmbeddingEngine::new(None).unwrap_or_else(|_| panic!("unused in this test path"))),
            Arc::new(VectorStore::open_in_memory().unwrap()),
        );

        let job_id = JobId::new();
        let err = pipeline.process(job_id, &app_data()).await.unwrap_err();
        assert!(matches!(err, PipelineError::AcceptanceClosed(_)));
        assert_eq!(PARSE_CALLS.load(Ordering::SeqCst), 0);
    }

    fn merge_cases() -> Vec<(Option<Value>, Option<Value>, Option<Value>)> {
        vec![
            (None, None, None),
            (
                Some(serde_json::json!({"phone": "555"})),
                None,
                Some(serde_json::json!({"phone": "555"})),
            ),
            (
                None,
                Some(serde_json::json!({"email": "a@b.com"})),
                Some(serde_json::json!({"email": "a@b.com"})),
            ),
            (
                Some(serde_json::json!({"phone": "555"})),
                Some(serde_json::json!({"email": "a@b.com"})),
                Some(serde_json::json!({"phone": "555", "email": "a@b.com"})),
            ),
        ]
    }

    #[test]
    fn merge_contact_info_prefers_standardizer_and_fills_gaps_from_parser() {
        for (std, pii, expected) in merge_cases() {
            assert_eq!(merge_contact_info(std, pii), expected);
        }
    }
}

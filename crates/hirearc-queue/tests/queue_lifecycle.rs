use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hirearc_config::{QueueConfig, ResourceConfig};
use hirearc_core::{ApplicationData, DocumentId, DocumentKind, JobStatus, Priority};
use hirearc_embed::EmbeddingEngine;
use hirearc_pipeline::{IngestionPipeline, JdMeta, MetadataStore, Parser, ParsedDocument, Standardizer};
use hirearc_queue::JobQueue;
use hirearc_store::VectorStore;
use serde_json::Value;

struct FakeParser;
#[async_trait]
impl Parser for FakeParser {
    async fn parse(&self, file_ref: &str) -> Result<ParsedDocument, hirearc_pipeline::PipelineError> {
        Ok(ParsedDocument {
            clean_text: format!("clean:{file_ref}"),
            raw_text: format!("raw:{file_ref}"),
            format: "pdf".to_string(),
            pii: None,
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
    ) -> Result<hirearc_core::StandardizedInfo, hirearc_pipeline::PipelineError> {
        Ok(hirearc_core::StandardizedInfo::new(
            "Engineer",
            4,
            vec!["Rust".to_string()],
            vec!["Ship features".to_string()],
            None,
            Default::default(),
        ))
    }
}

struct AlwaysAccepting;
#[async_trait]
impl MetadataStore for AlwaysAccepting {
    async fn resolve_jd(&self, _jd_token: &str) -> Result<JdMeta, hirearc_pipeline::PipelineError> {
        Ok(JdMeta {
            jd_id: DocumentId::new(),
            accepting: true,
        })
    }

    async fn link_application(
        &self,
        _application_id: DocumentId,
        _jd_id: DocumentId,
    ) -> Result<(), hirearc_pipeline::PipelineError> {
        Ok(())
    }
}

struct AlwaysClosed;
#[async_trait]
impl MetadataStore for AlwaysClosed {
    async fn resolve_jd(&self, _jd_token: &str) -> Result<JdMeta, hirearc_pipeline::PipelineError> {
        Ok(JdMeta {
            jd_id: DocumentId::new(),
            accepting: false,
        })
    }

    async fn link_application(
        &self,
        _application_id: DocumentId,
        _jd_id: DocumentId,
    ) -> Result<(), hirearc_pipeline::PipelineError> {
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
async fn submitted_job_completes_through_a_real_worker() {
    let pipeline = Arc::new(IngestionPipeline::new(
        Arc::new(FakeParser),
        Arc::new(FakeStandardizer),
        Arc::new(AlwaysAccepting),
        Arc::new(EmbeddingEngine::new(None).expect("model loads")),
        Arc::new(VectorStore::open_in_memory().unwrap()),
    ));

    let queue = JobQueue::new(pipeline, QueueConfig::default(), ResourceConfig::default());
    let job_id = queue.submit(app_data()).await.unwrap();

    let ok = wait_for_status_completed(&queue, job_id).await;
    assert!(ok, "job did not reach a terminal status in time");
}

async fn wait_for_status_completed(
    queue: &JobQueue<FakeParser, FakeStandardizer, AlwaysAccepting>,
    job_id: hirearc_core::JobId,
) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(30);
    loop {
        if let Some(view) = queue.get_status(job_id).await {
            if view.status == JobStatus::Completed {
                return true;
            }
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn job_retries_with_demoted_priority_then_fails_permanently() {
    let pipeline = Arc::new(IngestionPipeline::new(
        Arc::new(FakeParser),
        Arc::new(FakeStandardizer),
        Arc::new(AlwaysClosed),
        Arc::new(EmbeddingEngine::new(None).expect("model loads")),
        Arc::new(VectorStore::open_in_memory().unwrap()),
    ));

    let queue = JobQueue::new(pipeline, QueueConfig::default(), ResourceConfig::default());
    let job_id = queue.submit(app_data()).await.unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    let view = loop {
        if let Some(view) = queue.get_status(job_id).await {
            if view.status == JobStatus::Failed {
                break view;
            }
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("job did not permanently fail in time");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    };

    assert_eq!(view.retry_count, QueueConfig::default().job_max_retries);
    assert_eq!(view.priority, Priority::Low);
    assert!(view.error.is_some());

    let metrics = queue.system_metrics().await;
    assert_eq!(metrics.queue.failed_jobs, 1);
    assert_eq!(metrics.circuit_breaker.failures, 1);
}

#[tokio::test]
async fn configured_job_max_retries_governs_the_retry_budget() {
    let pipeline = Arc::new(IngestionPipeline::new(
        Arc::new(FakeParser),
        Arc::new(FakeStandardizer),
        Arc::new(AlwaysClosed),
        Arc::new(EmbeddingEngine::new(None).expect("model loads")),
        Arc::new(VectorStore::open_in_memory().unwrap()),
    ));

    let mut config = QueueConfig::default();
    config.job_max_retries = 1;

    let queue = JobQueue::new(pipeline, config, ResourceConfig::default());
    let job_id = queue.submit(app_data()).await.unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    let view = loop {
        if let Some(view) = queue.get_status(job_id).await {
            if view.status == JobStatus::Failed {
                break view;
            }
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("job did not permanently fail in time");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    };

    assert_eq!(view.retry_count, 1);
}

#[tokio::test]
async fn cancel_removes_a_queued_job() {
    let queue = JobQueue::new(
        Arc::new(IngestionPipeline::new(
            Arc::new(FakeParser),
            Arc::new(FakeStandardizer),
            Arc::new(AlwaysAccepting),
            Arc::new(EmbeddingEngine::new(None).expect("model loads")),
            Arc::new(VectorStore::open_in_memory().unwrap()),
        )),
        QueueConfig { min_workers: 0, ..QueueConfig::default() },
        ResourceConfig::default(),
    );

    let job_id = queue.submit(app_data()).await.unwrap();
    queue.cancel(job_id).await.unwrap();

    let view = queue.get_status(job_id).await.unwrap();
    assert_eq!(view.status, JobStatus::Cancelled);
}

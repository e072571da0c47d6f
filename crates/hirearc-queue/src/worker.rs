//! One worker's loop: pop highest-priority job, run it through the
//! ingestion pipeline, record the outcome, retry-with-demotion on failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use hirearc_core::{JobError, JobStatus};
use hirearc_pipeline::{IngestionPipeline, MetadataStore, Parser, Standardizer};
use tracing::{error, info};

use crate::circuit::CircuitBreaker;
use crate::metrics::EwmaEstimator;
use crate::state::QueueState;

const NO_JOB_SLEEP: Duration = Duration::from_millis(100);
const CIRCUIT_OPEN_SLEEP: Duration = Duration::from_secs(5);

pub(crate) async fn worker_loop<P, S, M>(
    worker_id: usize,
    state: Arc<std::sync::Mutex<QueueState>>,
    pipeline: Arc<IngestionPipeline<P, S, M>>,
    circuit: Arc<CircuitBreaker>,
    processing_time: Arc<EwmaEstimator>,
    paused: Arc<AtomicBool>,
    draining: Arc<AtomicBool>,
) where
    P: Parser + 'static,
    S: Standardizer + 'static,
    M: MetadataStore + 'static,
{
    loop {
        if circuit.is_open(Instant::now()) {
            tokio::time::sleep(CIRCUIT_OPEN_SLEEP).await;
            continue;
        }
        if paused.load(Ordering::SeqCst) {
            tokio::time::sleep(NO_JOB_SLEEP).await;
            continue;
        }

        let popped = {
            let mut state = state.lock().expect("queue state mutex poisoned");
            state.lanes.pop_highest().map(|job_id| {
                state.running.insert(job_id, Instant::now());
                if let Some(job) = state.jobs.get_mut(&job_id) {
                    job.status = JobStatus::Processing;
                    job.started_at = Some(Utc::now());
                }
                job_id
            })
        };

        let Some(job_id) = popped else {
            if draining.load(Ordering::SeqCst) {
                let empty = {
                    let state = state.lock().expect("queue state mutex poisoned");
                    state.lanes.len() == 0
                };
                if empty {
                    return;
                }
            }
            tokio::time::sleep(NO_JOB_SLEEP).await;
            continue;
        };

        let application_data = {
            let state = state.lock().expect("queue state mutex poisoned");
            state.jobs.get(&job_id).map(|job| job.application_data.clone())
        };
        let Some(application_data) = application_data else {
            continue;
        };

        info!(worker_id, job_id = %job_id, "processing job");
        let started = Instant::now();
        let result = pipeline.process(job_id, &application_data).await;
        let elapsed = started.elapsed();

        let mut state = state.lock().expect("queue state mutex poisoned");
        state.running.remove(&job_id);

        match result {
            Ok(document_id) => {
                processing_time.update(elapsed.as_secs_f64());
                state.completed_jobs += 1;
                if let Some(job) = state.jobs.get_mut(&job_id) {
                    job.status = JobStatus::Completed;
                    job.completed_at = Some(Utc::now());
                    job.result = Some(serde_json::json!({ "document_id": document_id.to_string() }));
                }
                info!(worker_id, job_id = %job_id, elapsed_s = elapsed.as_secs_f64(), "job completed");
            }
            Err(err) => {
                let job_error = JobError::new(err.kind(), Some(err.step().to_string()), err.to_string());
                let can_retry = state.jobs.get(&job_id).is_some_and(hirearc_core::Job::can_retry);

                if can_retry {
                    if let Some(job) = state.jobs.get_mut(&job_id) {
                        job.retry_count += 1;
                        job.priority = job.priority.demoted();
                        job.error = None;
                        job.status = JobStatus::Queued;
                        job.started_at = None;
                        let priority = job.priority;
                        state.lanes.push(priority, job_id);
                    }
                    info!(worker_id, job_id = %job_id, "job failed, retrying at demoted priority");
                } else {
                    circuit.record_failure(Instant::now());
                    state.failed_jobs += 1;
                    if let Some(job) = state.jobs.get_mut(&job_id) {
                        job.status = JobStatus::Failed;
                        job.completed_at = Some(Utc::now());
                        job.error = Some(job_error);
                    }
                    error!(worker_id, job_id = %job_id, "job permanently failed");
                }
            }
        }
        drop(state);
    }
}

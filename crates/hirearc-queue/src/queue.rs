//! `JobQueue`: the public C5 surface. Submission, cancellation, and status
//! lookups go through a single command-processor task (serializing state
//! mutation, mirroring the grounding example's actor); workers pop and
//! complete jobs by locking the same shared state directly, since that's a
//! hot path that shouldn't round-trip through a channel.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use hirearc_config::{QueueConfig, ResourceConfig};
use hirearc_core::{ApplicationData, Job, JobError, JobId, JobStatus, Priority};
use hirearc_pipeline::{IngestionPipeline, MetadataStore, Parser, Standardizer};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::circuit::CircuitBreaker;
use crate::error::QueueError;
use crate::metrics::{
    CircuitBreakerSnapshot, EwmaEstimator, PerformanceSnapshot, QueueCounts, SystemMetrics,
    WorkerCounts,
};
use crate::resources::ResourceMonitor;
use crate::scaling::{self, ScaleDecision};
use crate::state::QueueState;
use crate::worker::worker_loop;

/// A job's status as reported to `get_status`/`list_jobs` callers (§6).
#[derive(Debug, Clone, serde::Serialize)]
pub struct JobStatusView {
    pub job_id: JobId,
    pub status: JobStatus,
    pub priority: Priority,
    pub created_at: chrono::DateTime<Utc>,
    pub started_at: Option<chrono::DateTime<Utc>>,
    pub completed_at: Option<chrono::DateTime<Utc>>,
    pub result: Option<Value>,
    pub error: Option<JobError>,
    pub retry_count: u32,
    pub queue_position: Option<usize>,
    pub eta_seconds: Option<f64>,
}

/// Operator actions accepted by `control` (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Pause,
    Resume,
    ScaleUp,
    ScaleDown,
    ResetCircuitBreaker,
}

pub(crate) enum JobCommand {
    Submit {
        job: Job,
        response: oneshot::Sender<JobId>,
    },
    Cancel {
        job_id: JobId,
        response: oneshot::Sender<Result<(), QueueError>>,
    },
    GetStatus {
        job_id: JobId,
        response: oneshot::Sender<Option<(Job, Option<usize>)>>,
    },
    ListJobs {
        response: oneshot::Sender<Vec<(Job, Option<usize>)>>,
    },
    Snapshot {
        response: oneshot::Sender<QueueCounts>,
    },
}

pub struct JobQueue<P, S, M> {
    pipeline: Arc<IngestionPipeline<P, S, M>>,
    state: Arc<std::sync::Mutex<QueueState>>,
    cmd_tx: mpsc::UnboundedSender<JobCommand>,
    queue_config: QueueConfig,
    resource_config: ResourceConfig,
    resources: Arc<ResourceMonitor>,
    circuit: Arc<CircuitBreaker>,
    processing_time: Arc<EwmaEstimator>,
    workers: Arc<AsyncMutex<Vec<JoinHandle<()>>>>,
    current_workers: Arc<AtomicUsize>,
    paused: Arc<AtomicBool>,
    draining: Arc<AtomicBool>,
    last_scale_check: Arc<std::sync::Mutex<Instant>>,
}

impl<P, S, M> JobQueue<P, S, M>
where
    P: Parser + 'static,
    S: Standardizer + 'static,
    M: MetadataStore + 'static,
{
    #[must_use]
    pub fn new(
        pipeline: Arc<IngestionPipeline<P, S, M>>,
        queue_config: QueueConfig,
        resource_config: ResourceConfig,
    ) -> Self {
        let state = Arc::new(std::sync::Mutex::new(QueueState::new()));
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(command_processor(cmd_rx, Arc::clone(&state)));
        tokio::spawn(sweep_expired_jobs(
            Arc::clone(&state),
            Duration::from_secs(queue_config.status_ttl_seconds),
        ));

        let circuit = Arc::new(CircuitBreaker::new(
            queue_config.circuit_threshold,
            Duration::from_secs(queue_config.circuit_window_seconds),
            Duration::from_secs(queue_config.circuit_recovery_seconds),
        ));

        let this = Self {
            pipeline,
            state,
            cmd_tx,
            queue_config,
            resource_config,
            resources: Arc::new(ResourceMonitor::new()),
            circuit,
            processing_time: Arc::new(EwmaEstimator::new()),
            workers: Arc::new(AsyncMutex::new(Vec::new())),
            current_workers: Arc::new(AtomicUsize::new(0)),
            paused: Arc::new(AtomicBool::new(false)),
            draining: Arc::new(AtomicBool::new(false)),
            last_scale_check: Arc::new(std::sync::Mutex::new(Instant::now())),
        };

        for _ in 0..queue_config.min_workers {
            this.spawn_worker();
        }

        this
    }

    fn spawn_worker(&self) {
        let id = self.current_workers.fetch_add(1, Ordering::SeqCst);
        let handle = tokio::spawn(worker_loop(
            id,
            Arc::clone(&self.state),
            Arc::clone(&self.pipeline),
            Arc::clone(&self.circuit),
            Arc::clone(&self.processing_time),
            Arc::clone(&self.paused),
            Arc::clone(&self.draining),
        ));
        let workers = Arc::clone(&self.workers);
        tokio::spawn(async move {
            workers.lock().await.push(handle);
        });
    }

    /// §4.5 `submit_application`: admission-checked, non-blocking enqueue.
    pub async fn submit(&self, application_data: ApplicationData) -> Result<JobId, QueueError> {
        if self.draining.load(Ordering::SeqCst) {
            return Err(QueueError::ShuttingDown);
        }

        let sample = self.resources.sample();
        let queue_size = self.state.lock().expect("queue state mutex poisoned").lanes.len();
        if scaling::is_overloaded(&self.queue_config, &self.resource_config, queue_size, sample) {
            return Err(QueueError::Overloaded("resource thresholds exceeded"));
        }

        let job = Job::with_max_retries(application_data, Utc::now(), self.queue_config.job_max_retries);
        let job_id = job.job_id;

        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(JobCommand::Submit { job, response: tx });
        let job_id = rx.await.unwrap_or(job_id);

        self.maybe_auto_scale().await;
        Ok(job_id)
    }

    pub async fn cancel(&self, job_id: JobId) -> Result<(), QueueError> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(JobCommand::Cancel { job_id, response: tx });
        rx.await.unwrap_or(Err(QueueError::NotFound(job_id)))
    }

    pub async fn get_status(&self, job_id: JobId) -> Option<JobStatusView> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(JobCommand::GetStatus { job_id, response: tx });
        let (job, position) = rx.await.ok()??;
        Some(self.to_status_view(job, position))
    }

    pub async fn list_jobs(&self) -> Vec<JobStatusView> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(JobCommand::ListJobs { response: tx });
        rx.await
            .unwrap_or_default()
            .into_iter()
            .map(|(job, position)| self.to_status_view(job, position))
            .collect()
    }

    fn to_status_view(&self, job: Job, queue_position: Option<usize>) -> JobStatusView {
        let eta_seconds = if job.status == JobStatus::Queued {
            self.processing_time.estimate()
        } else {
            None
        };
        JobStatusView {
            job_id: job.job_id,
            status: job.status,
            priority: job.priority,
            created_at: job.created_at,
            started_at: job.started_at,
            completed_at: job.completed_at,
            result: job.result,
            error: job.error,
            retry_count: job.retry_count,
            queue_position,
            eta_seconds,
        }
    }

    pub async fn system_metrics(&self) -> SystemMetrics {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(JobCommand::Snapshot { response: tx });
        let queue = rx.await.unwrap_or(QueueCounts {
            total_jobs: 0,
            completed_jobs: 0,
            failed_jobs: 0,
            current_queue_size: 0,
            queue_size_urgent: 0,
            queue_size_high: 0,
            queue_size_normal: 0,
            queue_size_low: 0,
        });
        let sample = self.resources.sample();

        SystemMetrics {
            queue,
            workers: WorkerCounts {
                active_workers: self.state.lock().expect("queue state mutex poisoned").running.len(),
                total_workers: self.current_workers.load(Ordering::SeqCst),
                max_workers: self.queue_config.max_workers,
            },
            performance: PerformanceSnapshot {
                average_processing_time_seconds: self.processing_time.estimate(),
                memory_usage_mb: sample.memory_used_mb,
                cpu_usage_percent: sample.cpu_percent,
            },
            circuit_breaker: CircuitBreakerSnapshot {
                is_open: self.circuit.is_open(Instant::now()),
                failures: self.circuit.failure_count(),
            },
        }
    }

    /// Operator actions (§6 `control`).
    pub async fn control(&self, action: ControlAction) -> Result<(), QueueError> {
        match action {
            ControlAction::Pause => self.paused.store(true, Ordering::SeqCst),
            ControlAction::Resume => self.paused.store(false, Ordering::SeqCst),
            ControlAction::ScaleUp => self.spawn_worker(),
            ControlAction::ScaleDown => {
                if let Some(handle) = self.workers.lock().await.pop() {
                    handle.abort();
                    self.current_workers.fetch_sub(1, Ordering::SeqCst);
                }
            }
            ControlAction::ResetCircuitBreaker => self.circuit.reset(),
        }
        Ok(())
    }

    /// §4.5 graceful shutdown: stop admitting work, let running jobs drain,
    /// and give up after `deadline` even if the queue isn't empty.
    pub async fn shutdown(&self, deadline: Duration) {
        self.draining.store(true, Ordering::SeqCst);

        let start = Instant::now();
        loop {
            let empty = {
                let state = self.state.lock().expect("queue state mutex poisoned");
                state.lanes.len() == 0 && state.running.is_empty()
            };
            if empty || start.elapsed() >= deadline {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let handles: Vec<_> = self.workers.lock().await.drain(..).collect();
        for handle in handles {
            handle.abort();
        }
        info!("job queue shutdown complete");
    }

    async fn maybe_auto_scale(&self) {
        let now = Instant::now();
        {
            let mut last = self.last_scale_check.lock().expect("scale-check mutex poisoned");
            if now.duration_since(*last) < Duration::from_secs(self.queue_config.scale_interval_seconds) {
                return;
            }
            *last = now;
        }

        let queue_size = self.state.lock().expect("queue state mutex poisoned").lanes.len();
        let sample = self.resources.sample();
        let current = self.current_workers.load(Ordering::SeqCst);

        match scaling::decide(
            &self.queue_config,
            &self.resource_config,
            current,
            queue_size,
            sample,
            self.processing_time.estimate(),
        ) {
            ScaleDecision::Up(n) => {
                for _ in 0..n {
                    self.spawn_worker();
                }
                info!(added = n, total = current + n, "scaled up");
            }
            ScaleDecision::Down(n) => {
                for _ in 0..n {
                    if let Some(handle) = self.workers.lock().await.pop() {
                        handle.abort();
                        self.current_workers.fetch_sub(1, Ordering::SeqCst);
                    }
                }
                warn!(removed = n, "scaled down");
            }
            ScaleDecision::Hold => {}
        }
    }
}

async fn command_processor(
    mut receiver: mpsc::UnboundedReceiver<JobCommand>,
    state: Arc<std::sync::Mutex<QueueState>>,
) {
    while let Some(cmd) = receiver.recv().await {
        match cmd {
            JobCommand::Submit { job, response } => {
                let job_id = job.job_id;
                let mut state = state.lock().expect("queue state mutex poisoned");
                state.lanes.push(job.priority, job_id);
                state.total_jobs += 1;
                state.jobs.insert(job_id, job);
                let _ = response.send(job_id);
            }
            JobCommand::Cancel { job_id, response } => {
                let mut state = state.lock().expect("queue state mutex poisoned");
                let result = if state.jobs.contains_key(&job_id) {
                    state.lanes.remove(job_id);
                    state.running.remove(&job_id);
                    if let Some(job) = state.jobs.get_mut(&job_id) {
                        if job.status.can_transition_to(JobStatus::Cancelled) {
                            job.status = JobStatus::Cancelled;
                        }
                    }
                    Ok(())
                } else {
                    Err(QueueError::NotFound(job_id))
                };
                let _ = response.send(result);
            }
            JobCommand::GetStatus { job_id, response } => {
                let state = state.lock().expect("queue state mutex poisoned");
                let reply = state
                    .jobs
                    .get(&job_id)
                    .map(|job| (job.clone(), state.lanes.position(job_id)));
                let _ = response.send(reply);
            }
            JobCommand::ListJobs { response } => {
                let state = state.lock().expect("queue state mutex poisoned");
                let jobs = state
                    .jobs
                    .values()
                    .map(|job| (job.clone(), state.lanes.position(job.job_id)))
                    .collect();
                let _ = response.send(jobs);
            }
            JobCommand::Snapshot { response } => {
                let state = state.lock().expect("queue state mutex poisoned");
                let counts = QueueCounts {
                    total_jobs: state.total_jobs,
                    completed_jobs: state.completed_jobs,
                    failed_jobs: state.failed_jobs,
                    current_queue_size: state.lanes.len(),
                    queue_size_urgent: state.lanes.len_at(Priority::Urgent),
                    queue_size_high: state.lanes.len_at(Priority::High),
                    queue_size_normal: state.lanes.len_at(Priority::Normal),
                    queue_size_low: state.lanes.len_at(Priority::Low),
                };
                let _ = response.send(counts);
            }
        }
    }
}

/// §4.5: `jobs` is a bounded map. Runs roughly every `ttl / 4` (never less
/// than a second) so the sweep interval scales with the configured TTL
/// instead of hardcoding a cadence unrelated to it.
async fn sweep_expired_jobs(state: Arc<std::sync::Mutex<QueueState>>, ttl: Duration) {
    let interval = (ttl / 4).max(Duration::from_secs(1));
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(600));
    loop {
        tokio::time::sleep(interval).await;
        let evicted = {
            let mut state = state.lock().expect("queue state mutex poisoned");
            state.sweep_expired(ttl, Utc::now())
        };
        if evicted > 0 {
            info!(evicted, "swept expired job records");
        }
    }
}

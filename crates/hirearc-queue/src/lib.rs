//! # hirearc-queue
//!
//! The enterprise job queue (C5): priority-ordered admission of application
//! jobs onto a bounded, auto-scaling worker pool that drives [`hirearc_pipeline`],
//! with retry-with-demotion and a circuit breaker protecting it from a
//! persistently failing downstream. Holds no HTTP surface of its own — that's
//! `hirearc-cli`'s job; this crate is the scheduling core underneath it.

mod circuit;
mod error;
mod metrics;
mod queue;
mod resources;
mod scaling;
mod state;
mod worker;

pub use error::QueueError;
pub use metrics::{
    CircuitBreakerSnapshot, EwmaEstimator, PerformanceSnapshot, QueueCounts, SystemMetrics,
    WorkerCounts,
};
pub use queue::{ControlAction, JobQueue, JobStatusView};
pub use resources::{ResourceMonitor, ResourceSample};

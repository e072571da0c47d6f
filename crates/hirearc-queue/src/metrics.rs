//! The EWMA processing-time estimator and the aggregate metrics snapshot
//! returned by `system_metrics()` (§4.5, §6).

use std::sync::Mutex;

use serde::Serialize;

const ALPHA: f64 = 0.1;

/// Exponentially weighted moving average of job processing time, alpha =
/// 0.1 per §4.5. Seeds on the first sample rather than starting at zero, so
/// one slow job doesn't take nine fast updates to reflect in the estimate.
pub struct EwmaEstimator {
    value: Mutex<Option<f64>>,
}

impl EwmaEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self { value: Mutex::new(None) }
    }

    pub fn update(&self, sample_seconds: f64) {
        let mut value = self.value.lock().expect("estimator mutex poisoned");
        *value = Some(match *value {
            None => sample_seconds,
            Some(prev) => (1.0 - ALPHA) * prev + ALPHA * sample_seconds,
        });
    }

    #[must_use]
    pub fn estimate(&self) -> Option<f64> {
        *self.value.lock().expect("estimator mutex poisoned")
    }
}

impl Default for EwmaEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueueCounts {
    pub total_jobs: u64,
    pub completed_jobs: u64,
    pub failed_jobs: u64,
    pub current_queue_size: usize,
    pub queue_size_urgent: usize,
    pub queue_size_high: usize,
    pub queue_size_normal: usize,
    pub queue_size_low: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkerCounts {
    pub active_workers: usize,
    pub total_workers: usize,
    pub max_workers: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerformanceSnapshot {
    pub average_processing_time_seconds: Option<f64>,
    pub memory_usage_mb: u64,
    pub cpu_usage_percent: f32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CircuitBreakerSnapshot {
    pub is_open: bool,
    pub failures: u32,
}

/// The full operator-facing snapshot per §6's `system_metrics()` contract.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemMetrics {
    pub queue: QueueCounts,
    pub workers: WorkerCounts,
    pub performance: PerformanceSnapshot,
    pub circuit_breaker: CircuitBreakerSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_seeds_the_estimate() {
        let e = EwmaEstimator::new();
        assert_eq!(e.estimate(), None);
        e.update(10.0);
        assert_eq!(e.estimate(), Some(10.0));
    }

    #[test]
    fn later_samples_blend_at_alpha_0_1() {
        let e = EwmaEstimator::new();
        e.update(10.0);
        e.update(20.0);
        let expected = 0.9 * 10.0 + 0.1 * 20.0;
        assert!((e.estimate().unwrap() - expected).abs() < 1e-9);
    }
}

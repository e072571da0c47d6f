//! Enterprise job queue configuration: pool sizing, auto-scaling, retries,
//! and the queue's own circuit breaker.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct QueueConfig {
    #[serde(default = "default_min_workers")]
    pub min_workers: usize,
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default = "default_queue_high_watermark")]
    pub queue_high_watermark: usize,
    #[serde(default = "default_queue_low_watermark")]
    pub queue_low_watermark: usize,
    #[serde(default = "default_scale_interval_seconds")]
    pub scale_interval_seconds: u64,
    #[serde(default = "default_job_max_retries")]
    pub job_max_retries: u32,
    #[serde(default = "default_circuit_threshold")]
    pub circuit_threshold: u32,
    #[serde(default = "default_circuit_window_seconds")]
    pub circuit_window_seconds: u64,
    #[serde(default = "default_circuit_recovery_seconds")]
    pub circuit_recovery_seconds: u64,
    #[serde(default = "default_status_ttl_seconds")]
    pub status_ttl_seconds: u64,
}

const fn default_min_workers() -> usize {
    2
}
const fn default_max_workers() -> usize {
    50
}
const fn default_queue_high_watermark() -> usize {
    1000
}
const fn default_queue_low_watermark() -> usize {
    10
}
const fn default_scale_interval_seconds() -> u64 {
    30
}
const fn default_job_max_retries() -> u32 {
    3
}
const fn default_circuit_threshold() -> u32 {
    10
}
const fn default_circuit_window_seconds() -> u64 {
    300
}
const fn default_circuit_recovery_seconds() -> u64 {
    300
}
const fn default_status_ttl_seconds() -> u64 {
    600
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_workers: default_min_workers(),
            max_workers: default_max_workers(),
            queue_high_watermark: default_queue_high_watermark(),
            queue_low_watermark: default_queue_low_watermark(),
            scale_interval_seconds: default_scale_interval_seconds(),
            job_max_retries: default_job_max_retries(),
            circuit_threshold: default_circuit_threshold(),
            circuit_window_seconds: default_circuit_window_seconds(),
            circuit_recovery_seconds: default_circuit_recovery_seconds(),
            status_ttl_seconds: default_status_ttl_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_configuration_surface() {
        let c = QueueConfig::default();
        assert_eq!(c.min_workers, 2);
        assert_eq!(c.max_workers, 50);
        assert_eq!(c.queue_high_watermark, 1000);
        assert_eq!(c.job_max_retries, 3);
        assert_eq!(c.circuit_threshold, 10);
        assert_eq!(c.status_ttl_seconds, 600);
    }
}

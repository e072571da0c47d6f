//! Pure auto-scaling and admission decisions (§4.5), kept free of I/O and
//! locking so they're trivial to table-test.

use hirearc_config::{QueueConfig, ResourceConfig};

use crate::resources::ResourceSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScaleDecision {
    Up(usize),
    Down(usize),
    Hold,
}

/// §4.5 scale-up / scale-down conditions, evaluated once per
/// `scale_interval_seconds`.
pub(crate) fn decide(
    queue_config: &QueueConfig,
    resource_config: &ResourceConfig,
    current_workers: usize,
    queue_size: usize,
    sample: ResourceSample,
    average_processing_time_seconds: Option<f64>,
) -> ScaleDecision {
    let should_scale_up = queue_size > queue_config.queue_high_watermark
        && current_workers < queue_config.max_workers
        && (sample.memory_used_mb as f64) < resource_config.memory_limit_mb as f64 * 0.8
        && sample.cpu_percent < resource_config.cpu_limit_percent * 0.8;

    if should_scale_up {
        let room = queue_config.max_workers - current_workers;
        return ScaleDecision::Up(room.min(5));
    }

    let should_scale_down = queue_size < queue_config.queue_low_watermark
        && current_workers > queue_config.min_workers
        && average_processing_time_seconds.is_none_or(|t| t < 30.0);

    if should_scale_down {
        let excess = current_workers - queue_config.min_workers;
        return ScaleDecision::Down(excess.min(2));
    }

    ScaleDecision::Hold
}

/// §4.5 admission check: `submit` rejects before anything is enqueued.
pub(crate) fn is_overloaded(
    queue_config: &QueueConfig,
    resource_config: &ResourceConfig,
    queue_size: usize,
    sample: ResourceSample,
) -> bool {
    sample.memory_used_mb > resource_config.memory_limit_mb
        || f64::from(sample.cpu_percent) > f64::from(resource_config.cpu_limit_percent)
        || queue_size > queue_config.queue_high_watermark * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_sample() -> ResourceSample {
        ResourceSample {
            memory_used_mb: 100,
            cpu_percent: 10.0,
        }
    }

    #[test]
    fn scales_up_when_queue_deep_and_resources_free() {
        let qc = QueueConfig::default();
        let rc = ResourceConfig::default();
        let decision = decide(&qc, &rc, 2, qc.queue_high_watermark + 1, light_sample(), Some(1.0));
        assert_eq!(decision, ScaleDecision::Up(5));
    }

    #[test]
    fn does_not_scale_up_near_memory_limit() {
        let qc = QueueConfig::default();
        let rc = ResourceConfig::default();
        let near_limit = ResourceSample {
            memory_used_mb: (rc.memory_limit_mb as f64 * 0.9) as u64,
            cpu_percent: 5.0,
        };
        let decision = decide(&qc, &rc, 2, qc.queue_high_watermark + 1, near_limit, Some(1.0));
        assert_eq!(decision, ScaleDecision::Hold);
    }

    #[test]
    fn scales_down_when_queue_shallow_and_workers_above_min() {
        let qc = QueueConfig::default();
        let rc = ResourceConfig::default();
        let decision = decide(&qc, &rc, 10, 1, light_sample(), Some(5.0));
        assert_eq!(decision, ScaleDecision::Down(2));
    }

    #[test]
    fn holds_at_min_workers_even_with_empty_queue() {
        let qc = QueueConfig::default();
        let rc = ResourceConfig::default();
        let decision = decide(&qc, &rc, qc.min_workers, 0, light_sample(), Some(1.0));
        assert_eq!(decision, ScaleDecision::Hold);
    }

    #[test]
    fn overloaded_at_double_high_watermark() {
        let qc = QueueConfig::default();
        let rc = ResourceConfig::default();
        assert!(!is_overloaded(&qc, &rc, qc.queue_high_watermark * 2, light_sample()));
        assert!(is_overloaded(&qc, &rc, qc.queue_high_watermark * 2 + 1, light_sample()));
    }

    #[test]
    fn overloaded_when_memory_exceeds_limit() {
        let qc = QueueConfig::default();
        let rc = ResourceConfig::default();
        let over = ResourceSample {
            memory_used_mb: rc.memory_limit_mb + 1,
            cpu_percent: 1.0,
        };
        assert!(is_overloaded(&qc, &rc, 0, over));
    }
}

//! Rate limiter and admission controller configuration: per-endpoint-class
//! limit profiles, reputation decay, and the limiter's own circuit breaker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Limit profile for one endpoint classification tag.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct EndpointProfile {
    pub requests_per_hour: u32,
    pub concurrent_limit: u32,
    pub burst_allowance: u32,
    pub priority: u8,
}

impl EndpointProfile {
    const fn new(requests_per_hour: u32, concurrent_limit: u32, priority: u8) -> Self {
        Self {
            requests_per_hour,
            concurrent_limit,
            burst_allowance: 5,
            priority,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RateLimitConfig {
    /// Limit profile keyed by the classification tag (`health`, `auth`,
    /// `admin`, `file_upload`, `job_application`, `job_view`, `static`,
    /// `general`). Always populated with all eight tags by
    /// [`RateLimitConfig::default`]; a project file may override individual
    /// entries.
    #[serde(default = "default_endpoints")]
    pub endpoints: BTreeMap<String, EndpointProfile>,

    #[serde(default = "default_reputation_decay_up")]
    pub reputation_decay_up: f64,
    #[serde(default = "default_reputation_decay_down")]
    pub reputation_decay_down: f64,
    #[serde(default = "default_min_reputation")]
    pub min_reputation: f64,

    #[serde(default = "default_max_global_concurrent_multiplier")]
    pub circuit_trip_multiplier: f64,
    #[serde(default = "default_circuit_recovery_seconds")]
    pub circuit_recovery_seconds: u64,

    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

const fn default_reputation_decay_up() -> f64 {
    0.01
}
const fn default_reputation_decay_down() -> f64 {
    0.05
}
const fn default_min_reputation() -> f64 {
    0.1
}
const fn default_max_global_concurrent_multiplier() -> f64 {
    1.5
}
const fn default_circuit_recovery_seconds() -> u64 {
    300
}
const fn default_sweep_interval_seconds() -> u64 {
    300
}

fn default_endpoints() -> BTreeMap<String, EndpointProfile> {
    [
        ("health", EndpointProfile::new(10_000, 100, 10)),
        ("auth", EndpointProfile::new(100, 10, 8)),
        ("admin", EndpointProfile::new(200, 10, 9)),
        ("file_upload", EndpointProfile::new(20, 5, 5)),
        ("job_application", EndpointProfile::new(30, 10, 6)),
        ("job_view", EndpointProfile::new(500, 50, 3)),
        ("static", EndpointProfile::new(2000, 100, 1)),
        ("general", EndpointProfile::new(300, 30, 2)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            reputation_decay_up: default_reputation_decay_up(),
            reputation_decay_down: default_reputation_decay_down(),
            min_reputation: default_min_reputation(),
            circuit_trip_multiplier: default_max_global_concurrent_multiplier(),
            circuit_recovery_seconds: default_circuit_recovery_seconds(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

impl RateLimitConfig {
    /// The profile for `tag`, falling back to `general` if `tag` is unknown
    /// (mirrors the classifier's own "unrecognized path falls through to
    /// general" rule).
    #[must_use]
    pub fn profile(&self, tag: &str) -> EndpointProfile {
        self.endpoints
            .get(tag)
            .copied()
            .unwrap_or_else(|| self.endpoints["general"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_all_eight_endpoint_tags() {
        let c = RateLimitConfig::default();
        for tag in [
            "health",
            "auth",
            "admin",
            "file_upload",
            "job_application",
            "job_view",
            "static",
            "general",
        ] {
            assert!(c.endpoints.contains_key(tag), "missing tag {tag}");
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_general() {
        let c = RateLimitConfig::default();
        assert_eq!(c.profile("nonexistent"), c.endpoints["general"]);
    }

    #[test]
    fn reputation_defaults_match_configuration_surface() {
        let c = RateLimitConfig::default();
        assert!((c.reputation_decay_up - 0.01).abs() < f64::EPSILON);
        assert!((c.reputation_decay_down - 0.05).abs() < f64::EPSILON);
        assert!((c.min_reputation - 0.1).abs() < f64::EPSILON);
    }
}

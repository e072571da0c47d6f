//! Resource thresholds consulted by queue admission and auto-scaling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct ResourceConfig {
    #[serde(default = "default_memory_limit_mb")]
    pub memory_limit_mb: u64,
    #[serde(default = "default_cpu_limit_percent")]
    pub cpu_limit_percent: f32,
    #[serde(default = "default_max_global_concurrent")]
    pub max_global_concurrent: usize,
}

const fn default_memory_limit_mb() -> u64 {
    4096
}
const fn default_cpu_limit_percent() -> f32 {
    90.0
}
const fn default_max_global_concurrent() -> usize {
    200
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            memory_limit_mb: default_memory_limit_mb(),
            cpu_limit_percent: default_cpu_limit_percent(),
            max_global_concurrent: default_max_global_concurrent(),
        }
    }
}

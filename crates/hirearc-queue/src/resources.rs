//! Resident memory and CPU sampling for admission checks and auto-scaling
//! (§4.5), backed by `sysinfo`.

use std::sync::Mutex;

use sysinfo::System;

pub struct ResourceMonitor {
    system: Mutex<System>,
}

/// A snapshot of whatever the monitor last measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub memory_used_mb: u64,
    pub cpu_percent: f32,
}

impl ResourceMonitor {
    #[must_use]
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu_usage();
        Self {
            system: Mutex::new(system),
        }
    }

    /// Refresh and return the current memory/CPU usage. Blocking (consults
    /// `/proc` or platform equivalents); callers on the async runtime should
    /// dispatch this through `spawn_blocking` if sampled on a hot path.
    pub fn sample(&self) -> ResourceSample {
        let mut system = self.system.lock().expect("resource monitor mutex poisoned");
        system.refresh_memory();
        system.refresh_cpu_usage();
        ResourceSample {
            memory_used_mb: system.used_memory() / (1024 * 1024),
            cpu_percent: system.global_cpu_usage(),
        }
    }
}

impl Default for ResourceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_returns_plausible_values() {
        let monitor = ResourceMonitor::new();
        let sample = monitor.sample();
        assert!(sample.cpu_percent >= 0.0);
    }
}

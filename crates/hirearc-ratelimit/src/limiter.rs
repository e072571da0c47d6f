//! `RateLimiter`: the public C6 surface. `admit` is the single entry point
//! callers invoke before committing resources to a request (§5
//! backpressure); `finish` releases the concurrency slots it claimed.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use hirearc_config::RateLimitConfig;
use tracing::{info, warn};

use crate::circuit::GlobalCircuit;
use crate::classify::EndpointClass;
use crate::client::ClientState;
use crate::error::RateLimitError;

/// Response-header data for an admitted request (§4.6 Outputs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Admission {
    pub limit: u32,
    pub remaining: u32,
    pub reset_seconds: u64,
}

/// Aggregate counters for operator dashboards, mirroring the source's
/// `get_stats`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RateLimitStats {
    pub total_requests: u64,
    pub total_rejections: u64,
    pub active_clients: usize,
    pub global_concurrent: usize,
    pub max_global_concurrent: usize,
    pub circuit_breaker_open: bool,
    pub average_reputation: f64,
}

pub struct RateLimiter {
    config: RateLimitConfig,
    max_global_concurrent: usize,
    clients: Arc<DashMap<String, ClientState>>,
    global_concurrent: Arc<AtomicUsize>,
    circuit: Arc<GlobalCircuit>,
    request_count: AtomicU64,
    rejection_count: AtomicU64,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig, max_global_concurrent: usize) -> Self {
        let circuit = Arc::new(GlobalCircuit::new(Duration::from_secs(config.circuit_recovery_seconds)));
        let clients: Arc<DashMap<String, ClientState>> = Arc::new(DashMap::new());

        tokio::spawn(sweep_loop(Arc::clone(&clients), Duration::from_secs(config.sweep_interval_seconds)));

        Self {
            config,
            max_global_concurrent,
            clients,
            global_concurrent: Arc::new(AtomicUsize::new(0)),
            circuit,
            request_count: AtomicU64::new(0),
            rejection_count: AtomicU64::new(0),
        }
    }

    /// §4.6 decision + housekeeping, merged into one call so check and
    /// record can't race each other the way the source's separate
    /// `is_rate_limited`/`record_request` calls could under concurrency.
    pub fn admit(&self, client_id: &str, tag: EndpointClass) -> Result<Admission, RateLimitError> {
        let now = Instant::now();

        if self.circuit.is_open(now) {
            return Err(RateLimitError::CircuitOpen {
                retry_after_seconds: self.config.circuit_recovery_seconds,
            });
        }

        let profile = self.config.profile(tag.as_str());
        let mut client = self.clients.entry(client_id.to_string()).or_insert_with(ClientState::new);
        client.prune(now);

        let reputation = client.reputation;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let adjusted_limit = (f64::from(profile.requests_per_hour) * reputation) as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let adjusted_concurrent = ((f64::from(profile.concurrent_limit) * reputation) as u32).max(1);

        if client.request_count() as u32 >= adjusted_limit {
            client.bad(self.config.reputation_decay_down, self.config.min_reputation);
            self.request_count.fetch_add(1, Ordering::Relaxed);
            self.rejection_count.fetch_add(1, Ordering::Relaxed);
            return Err(RateLimitError::Limited {
                reason: format!("hourly limit exceeded: {adjusted_limit} requests/hour"),
                retry_after_seconds: 3600,
            });
        }

        if client.concurrent >= adjusted_concurrent {
            client.suspicious(self.config.reputation_decay_down, self.config.min_reputation);
            self.request_count.fetch_add(1, Ordering::Relaxed);
            self.rejection_count.fetch_add(1, Ordering::Relaxed);
            return Err(RateLimitError::Limited {
                reason: format!("too many concurrent requests: {adjusted_concurrent} max"),
                retry_after_seconds: 60,
            });
        }

        if tag.is_resource_intensive() {
            let global = self.global_concurrent.load(Ordering::SeqCst);
            if global >= self.max_global_concurrent {
                #[allow(clippy::cast_precision_loss)]
                if global as f64 > self.max_global_concurrent as f64 * self.config.circuit_trip_multiplier {
                    self.circuit.trip(now);
                    warn!(global, limit = self.max_global_concurrent, "rate limiter circuit breaker tripped");
                }
                self.request_count.fetch_add(1, Ordering::Relaxed);
                self.rejection_count.fetch_add(1, Ordering::Relaxed);
                return Err(RateLimitError::Limited {
                    reason: format!("system busy: {} operations in progress", self.max_global_concurrent),
                    retry_after_seconds: 120,
                });
            }
        }

        client.good(self.config.reputation_decay_up);
        client.record(now);
        client.concurrent += 1;
        let remaining = adjusted_limit.saturating_sub(client.request_count() as u32);
        let reset_seconds = client.reset_seconds(now);
        drop(client);

        if tag.is_resource_intensive() {
            self.global_concurrent.fetch_add(1, Ordering::SeqCst);
        }
        self.request_count.fetch_add(1, Ordering::Relaxed);

        Ok(Admission {
            limit: adjusted_limit,
            remaining,
            reset_seconds,
        })
    }

    /// Releases the concurrency slot(s) `admit` claimed. Callers must
    /// guarantee this runs once per successful `admit`, regardless of how
    /// the request completes (§4.6).
    pub fn finish(&self, client_id: &str, tag: EndpointClass) {
        if let Some(mut client) = self.clients.get_mut(client_id) {
            client.concurrent = client.concurrent.saturating_sub(1);
        }
        if tag.is_resource_intensive() {
            self.global_concurrent.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |g| Some(g.saturating_sub(1))).ok();
        }
    }

    #[must_use]
    pub fn stats(&self) -> RateLimitStats {
        let active_clients = self.clients.len();
        let average_reputation = if active_clients == 0 {
            1.0
        } else {
            self.clients.iter().map(|entry| entry.reputation).sum::<f64>() / active_clients as f64
        };

        RateLimitStats {
            total_requests: self.request_count.load(Ordering::Relaxed),
            total_rejections: self.rejection_count.load(Ordering::Relaxed),
            active_clients,
            global_concurrent: self.global_concurrent.load(Ordering::SeqCst),
            max_global_concurrent: self.max_global_concurrent,
            circuit_breaker_open: self.circuit.is_open(Instant::now()),
            average_reputation,
        }
    }
}

/// §4.6 housekeeping: "every 5 minutes, sweep per-client state: drop
/// entries with empty windows and zero in-flight".
async fn sweep_loop(clients: Arc<DashMap<String, ClientState>>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;
        let now = Instant::now();
        let before = clients.len();
        clients.retain(|_, state| {
            state.prune(now);
            state.request_count() > 0 || state.concurrent > 0
        });
        let dropped = before - clients.len();
        if dropped > 0 {
            info!(dropped, remaining = clients.len(), "swept idle rate-limit client state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RateLimitConfig {
        RateLimitConfig::default()
    }

    #[tokio::test]
    async fn exactly_limit_requests_succeed_and_the_next_one_is_rejected() {
        let limiter = RateLimiter::new(config(), 200);
        let profile = limiter.config.profile("general");
        for _ in 0..profile.requests_per_hour {
            limiter.admit("1.2.3.4", EndpointClass::General).unwrap();
            limiter.finish("1.2.3.4", EndpointClass::General);
        }
        let err = limiter.admit("1.2.3.4", EndpointClass::General).unwrap_err();
        assert_eq!(err.retry_after_seconds(), 3600);
    }

    #[tokio::test]
    async fn concurrency_cap_hit_returns_limited_and_degrades_reputation() {
        let limiter = RateLimiter::new(config(), 200);
        let profile = limiter.config.profile("job_view");
        for _ in 0..profile.concurrent_limit {
            limiter.admit("9.9.9.9", EndpointClass::JobView).unwrap();
        }
        let err = limiter.admit("9.9.9.9", EndpointClass::JobView).unwrap_err();
        assert_eq!(err.kind(), hirearc_core::ErrorKind::RateLimited);
        assert_eq!(err.retry_after_seconds(), 60);
    }

    #[tokio::test]
    async fn third_concurrent_resource_intensive_request_is_rejected_at_cap_two() {
        let limiter = RateLimiter::new(config(), 2);
        assert!(limiter.admit("a", EndpointClass::JobApplication).is_ok());
        assert!(limiter.admit("b", EndpointClass::JobApplication).is_ok());
        let err = limiter.admit("c", EndpointClass::JobApplication).unwrap_err();
        assert_eq!(err.retry_after_seconds(), 120);
    }

    #[tokio::test]
    async fn exceeding_one_point_five_times_the_global_cap_trips_the_circuit() {
        let limiter = RateLimiter::new(config(), 2);
        limiter.admit("a", EndpointClass::JobApplication).unwrap();
        limiter.admit("b", EndpointClass::JobApplication).unwrap();
        // both now in-flight and at cap; force the circuit by bumping the
        // raw counter past 1.5x without going through admit's own guard.
        limiter.global_concurrent.fetch_add(2, Ordering::SeqCst);
        let _ = limiter.admit("c", EndpointClass::JobApplication);

        let stats = limiter.stats();
        assert!(stats.circuit_breaker_open);

        let err = limiter.admit("d", EndpointClass::JobApplication).unwrap_err();
        assert_eq!(err.kind(), hirearc_core::ErrorKind::CircuitOpen);
    }
}

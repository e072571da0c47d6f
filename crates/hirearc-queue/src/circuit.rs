//! The queue's own circuit breaker (§4.5): trips after `threshold` failures
//! within `window`, then forces workers to sleep for `recovery` before
//! resetting.
//!
//! Every method takes `now` explicitly rather than reading the clock
//! internally, so tests can drive it with synthetic instants instead of
//! real sleeps.

use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Inner {
    failures: u32,
    last_failure: Option<Instant>,
    opened_at: Option<Instant>,
}

pub struct CircuitBreaker {
    inner: Mutex<Inner>,
    threshold: u32,
    window: Duration,
    recovery: Duration,
}

impl CircuitBreaker {
    #[must_use]
    pub fn new(threshold: u32, window: Duration, recovery: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                failures: 0,
                last_failure: None,
                opened_at: None,
            }),
            threshold,
            window,
            recovery,
        }
    }

    /// Record a job-level failure. Failures that arrive more than `window`
    /// after the previous one don't accumulate onto a stale count.
    pub fn record_failure(&self, now: Instant) {
        let mut inner = self.inner.lock().expect("circuit breaker mutex poisoned");
        let stale = inner.last_failure.is_some_and(|t| now.duration_since(t) > self.window);
        if stale {
            inner.failures = 0;
        }
        inner.failures += 1;
        inner.last_failure = Some(now);
        if inner.failures >= self.threshold && inner.opened_at.is_none() {
            inner.opened_at = Some(now);
        }
    }

    /// Whether the breaker is currently open. Resets the failure count once
    /// `recovery` has elapsed since it tripped.
    #[must_use]
    pub fn is_open(&self, now: Instant) -> bool {
        let mut inner = self.inner.lock().expect("circuit breaker mutex poisoned");
        if let Some(opened_at) = inner.opened_at {
            if now.duration_since(opened_at) >= self.recovery {
                inner.opened_at = None;
                inner.failures = 0;
                inner.last_failure = None;
                return false;
            }
            return true;
        }
        false
    }

    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.inner.lock().expect("circuit breaker mutex poisoned").failures
    }

    /// Operator-triggered reset (`control(reset_circuit_breaker)`, §6).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("circuit breaker mutex poisoned");
        inner.failures = 0;
        inner.last_failure = None;
        inner.opened_at = None;
    }
}

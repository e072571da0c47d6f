//! Per-client tracking: a sliding request-timestamp window, an in-flight
//! concurrency counter, and a reputation score. One [`ClientState`] per
//! client id, held behind `DashMap`'s own per-shard locking rather than a
//! single mutex guarding a `HashMap` — the fine-grained-lock-per-bucket
//! shape §5 calls for.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(3600);

pub(crate) struct ClientState {
    window: VecDeque<Instant>,
    pub(crate) concurrent: u32,
    pub(crate) reputation: f64,
}

impl ClientState {
    pub(crate) fn new() -> Self {
        Self {
            window: VecDeque::new(),
            concurrent: 0,
            reputation: 1.0,
        }
    }

    /// Drops timestamps older than the 1h window (§4.6 "discarded lazily
    /// on access").
    pub(crate) fn prune(&mut self, now: Instant) {
        while let Some(&front) = self.window.front() {
            if now.duration_since(front) > WINDOW {
                self.window.pop_front();
            } else {
                break;
            }
        }
    }

    pub(crate) fn request_count(&self) -> usize {
        self.window.len()
    }

    pub(crate) fn record(&mut self, now: Instant) {
        self.window.push_back(now);
    }

    /// Seconds until the oldest in-window request ages out, for a
    /// `reset` hint on successful admission.
    pub(crate) fn reset_seconds(&self, now: Instant) -> u64 {
        self.window.front().map_or(0, |&front| {
            WINDOW.saturating_sub(now.duration_since(front)).as_secs()
        })
    }

    pub(crate) fn good(&mut self, decay_up: f64) {
        self.reputation = (self.reputation + decay_up).min(1.0);
    }

    pub(crate) fn bad(&mut self, decay_down: f64, min_reputation: f64) {
        self.reputation = (self.reputation - decay_down).max(min_reputation);
    }

    /// §4.6: "Suspicious" behavior degrades reputation by half the normal
    /// penalty, with a floor of `0.3 · min_reputation` — distinct from
    /// `min_reputation` itself, the floor for "bad" behavior.
    pub(crate) fn suspicious(&mut self, decay_down: f64, min_reputation: f64) {
        self.reputation = (self.reputation - decay_down / 2.0).max(0.3 * min_reputation);
    }
}

//! Shared, mutex-guarded queue state: the job table and the four priority
//! lanes. Accessed both by the command-processor task (submit/cancel/status)
//! and directly by worker loops (pop/requeue) — the same hybrid the
//! grounding example uses: an actor for the external API, direct locking
//! for the hot pop/complete path.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use hirearc_core::{Job, JobId, Priority};

/// Four FIFO lanes, one per [`Priority`]. Strict priority across lanes,
/// FIFO within one (§5 ordering guarantees).
#[derive(Default)]
pub(crate) struct PriorityLanes {
    lanes: [VecDeque<JobId>; 4],
}

impl PriorityLanes {
    pub(crate) fn push(&mut self, priority: Priority, id: JobId) {
        self.lanes[priority as usize].push_back(id);
    }

    pub(crate) fn pop_highest(&mut self) -> Option<JobId> {
        for p in Priority::all_highest_first() {
            if let Some(id) = self.lanes[p as usize].pop_front() {
                return Some(id);
            }
        }
        None
    }

    pub(crate) fn remove(&mut self, id: JobId) -> bool {
        let mut removed = false;
        for lane in &mut self.lanes {
            let before = lane.len();
            lane.retain(|queued| *queued != id);
            removed |= lane.len() != before;
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.lanes.iter().map(VecDeque::len).sum()
    }

    pub(crate) fn len_at(&self, priority: Priority) -> usize {
        self.lanes[priority as usize].len()
    }

    /// Approximate 0-based position: every job in a strictly higher lane,
    /// plus this job's offset within its own lane.
    pub(crate) fn position(&self, id: JobId) -> Option<usize> {
        for p in Priority::all_highest_first() {
            if let Some(offset) = self.lanes[p as usize].iter().position(|queued| *queued == id) {
                let ahead: usize = Priority::all_highest_first()
                    .into_iter()
                    .take_while(|&hp| hp != p)
                    .map(|hp| self.lanes[hp as usize].len())
                    .sum();
                return Some(ahead + offset);
            }
        }
        None
    }
}

pub(crate) struct QueueState {
    pub jobs: HashMap<JobId, Job>,
    pub lanes: PriorityLanes,
    pub running: HashMap<JobId, std::time::Instant>,
    pub total_jobs: u64,
    pub completed_jobs: u64,
    pub failed_jobs: u64,
}

impl QueueState {
    pub(crate) fn new() -> Self {
        Self {
            jobs: HashMap::new(),
            lanes: PriorityLanes::default(),
            running: HashMap::new(),
            total_jobs: 0,
            completed_jobs: 0,
            failed_jobs: 0,
        }
    }

    /// §4.5: "jobs is a bounded map: job records expire some time after
    /// completion". Drops reapable jobs (completed, cancelled, or
    /// permanently failed) whose `completed_at` is older than `ttl`;
    /// queued/processing jobs are never swept. Uses `is_reapable` rather
    /// than `is_terminal`, which only covers slot accounting and would
    /// leave permanently failed jobs in the map forever.
    pub(crate) fn sweep_expired(&mut self, ttl: chrono::Duration, now: DateTime<Utc>) -> usize {
        let expired: Vec<JobId> = self
            .jobs
            .values()
            .filter(|job| job.status.is_reapable())
            .filter(|job| job.completed_at.is_some_and(|at| now - at >= ttl))
            .map(|job| job.job_id)
            .collect();
        for id in &expired {
            self.jobs.remove(id);
        }
        expired.len()
    }
}

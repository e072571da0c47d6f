//! Queue-level errors. Job-level failures never surface as a `QueueError` —
//! per §4.5/§7 they are reported in the job record, not thrown at `submit`
//! or `status` callers.

use hirearc_core::{ErrorKind, JobId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue overloaded: {0}")]
    Overloaded(&'static str),

    #[error("circuit breaker open")]
    CircuitOpen,

    #[error("job not found: {0}")]
    NotFound(JobId),

    #[error("queue is shutting down, new submissions are rejected")]
    ShuttingDown,
}

impl QueueError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Overloaded(_) => ErrorKind::Overloaded,
            Self::CircuitOpen => ErrorKind::CircuitOpen,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::ShuttingDown => ErrorKind::Overloaded,
        }
    }
}

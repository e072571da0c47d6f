//! Admission rejections. Matches `hirearc_queue::QueueError`'s shape: a
//! small `thiserror` enum exposing a `kind()` for convergence into a
//! unified error at the CLI boundary, plus the retry-after hint every
//! rejection carries (§4.6 Outputs).

use hirearc_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RateLimitError {
    #[error("{reason}")]
    Limited { reason: String, retry_after_seconds: u64 },

    #[error("rate limiter circuit breaker is open")]
    CircuitOpen { retry_after_seconds: u64 },
}

impl RateLimitError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Limited { .. } => ErrorKind::RateLimited,
            Self::CircuitOpen { .. } => ErrorKind::CircuitOpen,
        }
    }

    #[must_use]
    pub const fn retry_after_seconds(&self) -> u64 {
        match self {
            Self::Limited { retry_after_seconds, .. } | Self::CircuitOpen { retry_after_seconds, .. } => {
                *retry_after_seconds
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limited_and_circuit_open_map_as_expected() {
        let limited = RateLimitError::Limited {
            reason: "Hourly limit exceeded".to_string(),
            retry_after_seconds: 3600,
        };
        assert_eq!(limited.kind(), ErrorKind::RateLimited);
        assert_eq!(limited.retry_after_seconds(), 3600);

        let open = RateLimitError::CircuitOpen { retry_after_seconds: 300 };
        assert_eq!(open.kind(), ErrorKind::CircuitOpen);
    }
}

//! The shared error classification every `hirearc-*` crate's own error type
//! carries, plus a plain `CoreError` for call sites that don't need a richer
//! domain-specific enum.
//!
//! Domain-specific errors (`EmbedError`, `StoreError`, `MatchError`, ...) are
//! defined in their respective crates and each exposes a `kind()` of this
//! type. A unified `HirearcError` is deferred to `hirearc-cli`, where all
//! crate errors converge via `#[from]`.

use thiserror::Error;

/// Abstract error classification, independent of which crate raised it.
///
/// Names match the error kinds enumerated for the matching contract: every
/// concrete error in this workspace maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Shape or content of a request violates the contract (empty text,
    /// missing required field).
    InvalidInput,
    /// Document id or job id not known.
    NotFound,
    /// Stored bundle has wrong counts/dimensions; unrecoverable without
    /// re-ingestion.
    Shape,
    /// Queue at hard cap or resource thresholds exceeded.
    Overloaded,
    /// Per-client or global rate limit hit.
    RateLimited,
    /// A circuit breaker (queue or rate limiter) is open.
    CircuitOpen,
    /// An external collaborator returned a permanent error.
    Upstream,
    /// Same as `Upstream` but retryable; used by internal retry loops only.
    Transient,
    /// Embedding model failed to load; fatal at startup.
    ModelInit,
    /// Unclassified.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Shape => "shape",
            Self::Overloaded => "overloaded",
            Self::RateLimited => "rate_limited",
            Self::CircuitOpen => "circuit_open",
            Self::Upstream => "upstream",
            Self::Transient => "transient",
            Self::ModelInit => "model_init",
            Self::Internal => "internal",
        }
    }

    /// Whether a caller may retry this error without changing anything.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Transient | Self::Overloaded | Self::RateLimited)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plain error carrying an [`ErrorKind`] and a message, for call sites
/// that don't warrant a dedicated enum.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct CoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

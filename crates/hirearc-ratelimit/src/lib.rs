//! # hirearc-ratelimit
//!
//! The rate limiter and admission controller (C6): per-client sliding
//! window, reputation-adjusted limits, global concurrency caps for
//! resource-intensive endpoint tags, and a circuit breaker protecting the
//! whole system from sustained overload. Invoked before any resources are
//! committed to a request (§5) — `hirearc-cli` calls [`RateLimiter::admit`]
//! at the top of its request handling and [`RateLimiter::finish`] once the
//! request completes, by whatever path.

mod circuit;
mod classify;
mod client;
mod error;
mod limiter;

pub use classify::{classify_endpoint, extract_client_ip, EndpointClass};
pub use error::RateLimitError;
pub use limiter::{Admission, RateLimitStats, RateLimiter};

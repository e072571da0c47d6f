//! Bounded retry for transient DuckDB errors (lock contention during
//! concurrent writers sharing one file-backed connection).
//!
//! Mirrors the teacher's `RetryConfig` shape (max attempts, base delay,
//! capped exponential backoff) applied to a different transient-error
//! predicate, since DuckDB's lock errors look nothing like Turso's.

use std::thread;
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(20),
            max_delay: Duration::from_millis(500),
        }
    }
}

/// Whether `e` looks like a transient DuckDB condition (lock contention)
/// rather than a genuine SQL/constraint error. Narrow on purpose: retrying a
/// real constraint violation would just fail the same way every time.
fn is_transient(e: &duckdb::Error) -> bool {
    let msg = e.to_string();
    msg.contains("lock") || msg.contains("database is locked") || msg.contains("Conflict")
}

/// Run `op`, retrying up to `config.max_attempts` times on transient
/// `duckdb::Error`s with capped exponential backoff. Non-transient errors
/// and retries-exhausted both surface the last `duckdb::Error` unchanged.
pub fn with_retry<T>(
    config: &RetryConfig,
    mut op: impl FnMut() -> Result<T, duckdb::Error>,
) -> Result<T, duckdb::Error> {
    let mut attempt = 0;
    let mut delay = config.base_delay;
    loop {
        attempt += 1;
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < config.max_attempts && is_transient(&e) => {
                warn!(attempt, error = %e, "retrying transient DuckDB error");
                thread::sleep(delay);
                delay = (delay * 2).min(config.max_delay);
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn succeeds_without_retry_on_first_try() {
        let config = RetryConfig::default();
        let result = with_retry(&config, || Ok::<_, duckdb::Error>(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn gives_up_immediately_on_non_transient_error() {
        let config = RetryConfig::default();
        let calls = Cell::new(0);
        let conn = duckdb::Connection::open_in_memory().expect("in-memory db opens");
        let result = with_retry(&config, || {
            calls.set(calls.get() + 1);
            conn.execute("SELECT * FROM no_such_table", [])
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}

use hirearc_config::RateLimitConfig;
use hirearc_ratelimit::{EndpointClass, RateLimiter};

/// S5 — Global admission: with `max_global_concurrent=2`, three concurrent
/// `job_application` submissions: exactly two proceed, the third is
/// rejected with a retry-after hint.
#[tokio::test]
async fn s5_global_admission_admits_exactly_two_of_three() {
    let limiter = RateLimiter::new(RateLimitConfig::default(), 2);

    let a = limiter.admit("10.0.0.1", EndpointClass::JobApplication);
    let b = limiter.admit("10.0.0.2", EndpointClass::JobApplication);
    let c = limiter.admit("10.0.0.3", EndpointClass::JobApplication);

    assert!(a.is_ok());
    assert!(b.is_ok());
    let err = c.unwrap_err();
    assert!(err.retry_after_seconds() > 0);
}

/// S6 — Reputation decay: a client rate-limited once (bad) then making 50
/// admitted requests (good) has reputation restored to >= 0.6.
#[tokio::test]
async fn s6_reputation_recovers_after_sustained_good_behavior() {
    let config = RateLimitConfig::default();
    let file_upload_limit = config.profile("file_upload").requests_per_hour;
    let limiter = RateLimiter::new(config, 200);

    // Exhaust the hourly cap for a tightly-limited endpoint to trigger one
    // "bad" reputation hit (degrades by decay_down).
    for _ in 0..file_upload_limit {
        limiter.admit("203.0.113.5", EndpointClass::FileUpload).unwrap();
        limiter.finish("203.0.113.5", EndpointClass::FileUpload);
    }
    assert!(limiter.admit("203.0.113.5", EndpointClass::FileUpload).is_err());

    // 50 subsequent good admissions against an endpoint with generous
    // limits restore reputation by decay_up each time.
    for _ in 0..50 {
        limiter.admit("203.0.113.5", EndpointClass::JobView).unwrap();
        limiter.finish("203.0.113.5", EndpointClass::JobView);
    }

    assert!(limiter.stats().average_reputation >= 0.6);
}

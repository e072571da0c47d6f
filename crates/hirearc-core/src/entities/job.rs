use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::DEFAULT_MAX_RETRIES;
use crate::enums::{JobStatus, Priority};
use crate::errors::ErrorKind;
use crate::ids::JobId;

/// The payload a client submits to enqueue an application. Applicant
/// identity, target job token, and CV file reference are the fields the
/// queue and pipeline act on directly; everything else rides along as
/// opaque metadata for the out-of-scope metadata store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ApplicationData {
    pub applicant_id: String,
    pub jd_token: String,
    pub cv_file_ref: String,
    pub priority_hint: Option<Priority>,
    #[serde(default)]
    pub metadata: Value,
}

/// The error kind and offending step recorded on a permanently failed job.
///
/// C4 fails fast with the step name in the error (§4.4); C5 stores that
/// verbatim rather than re-deriving it, so status polling can show exactly
/// where ingestion stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobError {
    pub kind: String,
    pub step: Option<String>,
    pub message: String,
}

impl JobError {
    #[must_use]
    pub fn new(kind: ErrorKind, step: Option<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            step,
            message: message.into(),
        }
    }
}

/// A queue entry tracking one application job through its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Job {
    pub job_id: JobId,
    pub application_data: ApplicationData,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
    pub retry_count: u32,
    pub max_retries: u32,
}

impl Job {
    #[must_use]
    pub fn new(application_data: ApplicationData, now: DateTime<Utc>) -> Self {
        Self::with_max_retries(application_data, now, DEFAULT_MAX_RETRIES)
    }

    /// Same as [`Job::new`] but with the retry budget taken from
    /// `QueueConfig::job_max_retries` rather than the crate default, so a
    /// configured value actually governs [`Job::can_retry`].
    #[must_use]
    pub fn with_max_retries(application_data: ApplicationData, now: DateTime<Utc>, max_retries: u32) -> Self {
        let priority = application_data.priority_hint.unwrap_or_default();
        Self {
            job_id: JobId::new(),
            application_data,
            priority,
            created_at: now,
            started_at: None,
            completed_at: None,
            status: JobStatus::Queued,
            result: None,
            error: None,
            retry_count: 0,
            max_retries,
        }
    }

    /// Whether this job has a retry budget remaining after a failure.
    #[must_use]
    pub const fn can_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_data() -> ApplicationData {
        ApplicationData {
            applicant_id: "applicant-1".to_string(),
            jd_token: "jd-token".to_string(),
            cv_file_ref: "s3://bucket/cv.pdf".to_string(),
            priority_hint: None,
            metadata: Value::Null,
        }
    }

    #[test]
    fn new_job_defaults_to_normal_priority_and_queued() {
        let job = Job::new(app_data(), Utc::now());
        assert_eq!(job.priority, Priority::Normal);
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.retry_count, 0);
        assert!(job.can_retry());
    }

    #[test]
    fn priority_hint_is_honored() {
        let mut data = app_data();
        data.priority_hint = Some(Priority::Urgent);
        let job = Job::new(data, Utc::now());
        assert_eq!(job.priority, Priority::Urgent);
    }

    #[test]
    fn retry_budget_exhausts_at_max_retries() {
        let mut job = Job::new(app_data(), Utc::now());
        job.retry_count = job.max_retries;
        assert!(!job.can_retry());
    }

    #[test]
    fn with_max_retries_overrides_the_crate_default() {
        let mut job = Job::with_max_retries(app_data(), Utc::now(), 7);
        assert_eq!(job.max_retries, 7);
        job.retry_count = 6;
        assert!(job.can_retry());
        job.retry_count = 7;
        assert!(!job.can_retry());
    }
}

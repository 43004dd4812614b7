//! Request payloads and resource paths for the job endpoints.

use serde::{Deserialize, Serialize};

use crate::model::Job;

/// `jobs/{id}`
pub fn job_path(id: &str) -> String {
    format!("jobs/{id}")
}

/// `jobs/{id}/acquire`
pub fn acquire_path(id: &str) -> String {
    format!("jobs/{id}/acquire")
}

/// `jobs/{id}/accept`
pub fn accept_path(id: &str) -> String {
    format!("jobs/{id}/accept")
}

/// `jobs/{id}/start`
pub fn start_path(id: &str) -> String {
    format!("jobs/{id}/start")
}

/// `jobs/{id}/finish`
pub fn finish_path(id: &str) -> String {
    format!("jobs/{id}/finish")
}

/// Body of `PUT jobs/{id}/start`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStartRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub started_at: Option<String>,
}

impl From<&Job> for JobStartRequest {
    fn from(job: &Job) -> Self {
        Self {
            started_at: non_empty(&job.started_at),
        }
    }
}

/// Body of `PUT jobs/{id}/finish`.
///
/// Unlike the string fields, `chunks_failed_count` is always serialized,
/// zero included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFinishRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub exit_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub signal: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub signal_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub finished_at: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub chunks_failed_count: u64,
}

impl From<&Job> for JobFinishRequest {
    fn from(job: &Job) -> Self {
        Self {
            exit_status: non_empty(&job.exit_status),
            signal: non_empty(&job.signal),
            signal_reason: non_empty(&job.signal_reason),
            finished_at: non_empty(&job.finished_at),
            chunks_failed_count: job.chunks_failed_count.unwrap_or(0),
        }
    }
}

// Empty strings are dropped from request bodies, same as unset fields.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_treated_as_unset() {
        let job = Job {
            started_at: Some(String::new()),
            signal: Some(String::new()),
            exit_status: Some("1".into()),
            ..Default::default()
        };

        assert_eq!(JobStartRequest::from(&job).started_at, None);

        let finish = JobFinishRequest::from(&job);
        assert_eq!(finish.signal, None);
        assert_eq!(finish.exit_status.as_deref(), Some("1"));
        assert_eq!(finish.chunks_failed_count, 0);
    }

    #[test]
    fn paths_embed_the_id_verbatim() {
        assert_eq!(job_path("abc"), "jobs/abc");
        assert_eq!(acquire_path("abc"), "jobs/abc/acquire");
        assert_eq!(accept_path("abc"), "jobs/abc/accept");
        assert_eq!(start_path("abc"), "jobs/abc/start");
        assert_eq!(finish_path(""), "jobs//finish");
    }
}

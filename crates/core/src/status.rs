//! Job status classification.
//!
//! The server reports status as a free-form string. Classification is
//! fail-closed: anything outside `running` / `complete` is a terminal
//! non-success, never "still running".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classified job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Running,
    Complete,
    Failed,
    Cancelled,
    /// Any status string this client does not recognize.
    Unknown,
}

impl JobState {
    /// Classify a raw status string.
    ///
    /// `"error"` is the spelling older servers use for `failed`.
    pub fn parse(status: &str) -> Self {
        match status {
            "running" => JobState::Running,
            "complete" => JobState::Complete,
            "failed" | "error" => JobState::Failed,
            "cancelled" | "canceled" => JobState::Cancelled,
            _ => JobState::Unknown,
        }
    }

    /// Whether no further transition can occur.
    ///
    /// `Unknown` counts as terminal: an unrecognized status must end
    /// polling, not keep it alive.
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobState::Running)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Running => "running",
            JobState::Complete => "complete",
            JobState::Failed => "failed",
            JobState::Cancelled => "cancelled",
            JobState::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Typed view of a `GET /status/{job_id}` response body.
///
/// All fields are optional so that partial or unexpected bodies still
/// classify (as [`JobState::Unknown`]) instead of failing the parse. The
/// `result` field is extracted separately by the poller so the raw payload
/// can be preserved for diagnostics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    /// Tolerant parse of a raw status payload.
    ///
    /// A body that is not a JSON object yields an empty response, which
    /// classifies as [`JobState::Unknown`].
    pub fn parse(payload: &serde_json::Value) -> Self {
        serde_json::from_value(payload.clone()).unwrap_or_default()
    }

    /// Classified state of this response.
    pub fn state(&self) -> JobState {
        self.status.as_deref().map_or(JobState::Unknown, JobState::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_classify() {
        assert_eq!(JobState::parse("running"), JobState::Running);
        assert_eq!(JobState::parse("complete"), JobState::Complete);
        assert_eq!(JobState::parse("failed"), JobState::Failed);
        assert_eq!(JobState::parse("cancelled"), JobState::Cancelled);
    }

    #[test]
    fn legacy_spellings_classify() {
        assert_eq!(JobState::parse("error"), JobState::Failed);
        assert_eq!(JobState::parse("canceled"), JobState::Cancelled);
    }

    #[test]
    fn anything_else_is_unknown_and_terminal() {
        for status in ["pending", "queued", "RUNNING", "", "done"] {
            let state = JobState::parse(status);
            assert_eq!(state, JobState::Unknown, "status {status:?}");
            assert!(state.is_terminal(), "status {status:?} must fail closed");
        }
    }

    #[test]
    fn only_running_continues() {
        assert!(!JobState::Running.is_terminal());
        assert!(JobState::Complete.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(JobState::Cancelled.is_terminal());
    }

    #[test]
    fn response_with_status_classifies() {
        let payload = serde_json::json!({"status": "running", "progress": 0.5});
        let response = StatusResponse::parse(&payload);
        assert_eq!(response.state(), JobState::Running);
        assert_eq!(response.progress, Some(0.5));
    }

    #[test]
    fn response_without_status_is_unknown() {
        let payload = serde_json::json!({"result": {"public_key": "x", "private_key": "y"}});
        assert_eq!(StatusResponse::parse(&payload).state(), JobState::Unknown);
    }

    #[test]
    fn non_object_body_is_unknown() {
        let payload = serde_json::json!("complete");
        assert_eq!(StatusResponse::parse(&payload).state(), JobState::Unknown);
    }
}

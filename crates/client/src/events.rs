//! Events emitted while a job is submitted and polled.
//!
//! The poller reports progress on a [`tokio::sync::broadcast`] channel
//! instead of printing, so embedding callers can route updates to any
//! sink. Call [`crate::Generator::subscribe`] to receive them.

use serde::Serialize;
use vanity_core::status::JobState;

/// A client-level event for one generation job.
#[derive(Debug, Clone, Serialize)]
pub enum JobEvent {
    /// The server accepted the submission and assigned a job ID.
    Submitted { job_id: String },

    /// A status query resolved while the job was still running.
    StatusUpdate {
        job_id: String,
        /// Classified status reported by the server.
        state: JobState,
        /// Completion estimate, when the server reports one.
        progress: Option<f64>,
    },

    /// The job completed and a result was extracted.
    Completed { job_id: String },

    /// The job reached a terminal non-success status.
    Failed {
        job_id: String,
        /// The raw status string the server reported.
        status: String,
    },

    /// Polling was cancelled before a terminal status was observed.
    Cancelled { job_id: String },
}

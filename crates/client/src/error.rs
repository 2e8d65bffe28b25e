//! Error types for the generation client.

/// Errors surfaced by the generation client.
///
/// Each variant names the stage and cause so callers can branch without
/// string inspection. All errors terminate the calling operation; none are
/// swallowed or silently retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Server returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The submission response did not contain a job identifier.
    ///
    /// No job the client can see was created, so a caller may retry the
    /// submission as a fresh operation.
    #[error("Submission rejected: {0}")]
    Submission(String),

    /// The job reached a terminal non-success status.
    ///
    /// Carries the server's raw status payload for diagnostics. The job
    /// identifier is dead; do not retry.
    #[error("Job failed: {payload}")]
    JobFailed { payload: serde_json::Value },

    /// A `complete` status arrived without a well-formed result payload.
    #[error("Malformed result payload: {0}")]
    MalformedResult(String),

    /// The returned address does not satisfy the requested pattern.
    #[error("Result {public_key} does not match pattern '{pattern}'")]
    ResultMismatch { public_key: String, pattern: String },

    /// The poll deadline or attempt budget was exhausted before a terminal
    /// status was observed.
    #[error("Gave up waiting for job after {attempts} status checks")]
    DeadlineExceeded { attempts: u32 },

    /// Polling was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,
}

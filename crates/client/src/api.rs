//! REST API client for the generation server's HTTP endpoints.
//!
//! Wraps the job protocol endpoints (submission, status, cancellation,
//! health) using [`reqwest`].

use serde::Deserialize;
use vanity_core::types::{GenerationRequest, JobHandle};

use crate::error::ClientError;

/// HTTP client for a single generation server.
pub struct GeneratorApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Wire shape of a `POST /generate` response.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    job_id: Option<String>,
}

impl GeneratorApi {
    /// Create a new API client for a generation server.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://127.0.0.1:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across multiple servers).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base HTTP URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a search request, returning the server-assigned job handle.
    ///
    /// Sends exactly one `POST /generate` request. A 2xx response whose
    /// body lacks a `job_id` fails with [`ClientError::Submission`]: no job
    /// the client can see was created, so the caller may retry with a fresh
    /// submission.
    pub async fn submit(&self, request: &GenerationRequest) -> Result<JobHandle, ClientError> {
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(request)
            .send()
            .await?;

        let body = Self::read_success(response).await?;
        let parsed: SubmitResponse =
            serde_json::from_str(&body).map_err(|_| ClientError::Submission(body.clone()))?;
        match parsed.job_id {
            Some(job_id) if !job_id.is_empty() => Ok(JobHandle::new(job_id)),
            _ => Err(ClientError::Submission(body)),
        }
    }

    /// Fetch the raw status payload for a job.
    ///
    /// Sends a `GET /status/{job_id}` request and returns the body as
    /// unparsed JSON, so terminal failures can carry the server's exact
    /// payload for diagnostics.
    pub async fn job_status(&self, job_id: &str) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .get(format!("{}/status/{}", self.base_url, job_id))
            .send()
            .await?;

        let body = Self::read_success(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::MalformedResult(format!("status body is not JSON: {e}")))
    }

    /// Ask the server to cancel a job.
    ///
    /// Sends a `POST /cancel/{job_id}` request. Best-effort: the job may
    /// still complete before the server observes the cancellation.
    pub async fn cancel(&self, job_id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}/cancel/{}", self.base_url, job_id))
            .send()
            .await?;

        Self::read_success(response).await?;
        Ok(())
    }

    /// Check server liveness via `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        let body = Self::read_success(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::MalformedResult(format!("health body: {e}")))
    }

    // ---- private helpers ----

    /// Read the body, ensuring a success status code first. Returns a
    /// [`ClientError::Api`] carrying the status and body on failure.
    async fn read_success(response: reqwest::Response) -> Result<String, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

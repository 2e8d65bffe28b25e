//! High-level facade combining submission and polling.
//!
//! [`Generator`] owns the REST client, the poll configuration, and the
//! event broadcast channel. One instance can drive any number of
//! concurrent jobs; all job state lives server-side, keyed by job ID, so
//! there is no shared mutable state between polls.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use vanity_core::pattern::matches_pattern;
use vanity_core::types::{AddressResult, GenerationRequest, JobHandle};

use crate::api::{GeneratorApi, HealthResponse};
use crate::error::ClientError;
use crate::events::JobEvent;
use crate::poller::{poll_job, PollConfig};

/// Broadcast channel capacity for job events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Client for the vanity address generation service.
pub struct Generator {
    api: GeneratorApi,
    poll_config: PollConfig,
    event_tx: broadcast::Sender<JobEvent>,
}

impl Generator {
    /// Create a generator for the server at `base_url` with default
    /// polling parameters.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(base_url, PollConfig::default())
    }

    /// Create a generator with explicit polling parameters.
    pub fn with_config(base_url: impl Into<String>, poll_config: PollConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api: GeneratorApi::new(base_url),
            poll_config,
            event_tx,
        }
    }

    /// Subscribe to job events (submissions, status updates, completions).
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.event_tx.subscribe()
    }

    /// Submit a search request. Exactly one job-creation request is sent.
    pub async fn submit(&self, request: &GenerationRequest) -> Result<JobHandle, ClientError> {
        let handle = self.api.submit(request).await?;
        tracing::info!(
            job_id = %handle.job_id,
            pattern = %request.pattern,
            position = %request.position,
            "Job submitted",
        );
        let _ = self.event_tx.send(JobEvent::Submitted {
            job_id: handle.job_id.clone(),
        });
        Ok(handle)
    }

    /// Poll a previously submitted job until it reaches a terminal state.
    pub async fn poll(
        &self,
        handle: &JobHandle,
        cancel: &CancellationToken,
    ) -> Result<AddressResult, ClientError> {
        poll_job(&self.api, handle, &self.poll_config, cancel, &self.event_tx).await
    }

    /// Submit a request and poll the resulting job to completion.
    ///
    /// Verifies that the returned address actually satisfies the requested
    /// pattern before handing it back — a violating result fails with
    /// [`ClientError::ResultMismatch`] instead of being returned silently.
    /// If polling is cancelled, asks the server (best-effort) to stop the
    /// job before returning [`ClientError::Cancelled`].
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<AddressResult, ClientError> {
        let handle = self.submit(request).await?;

        let result = match self.poll(&handle, cancel).await {
            Ok(result) => result,
            Err(ClientError::Cancelled) => {
                if let Err(e) = self.api.cancel(&handle.job_id).await {
                    tracing::warn!(
                        job_id = %handle.job_id,
                        error = %e,
                        "Failed to cancel job on server",
                    );
                }
                return Err(ClientError::Cancelled);
            }
            Err(e) => return Err(e),
        };

        if !matches_pattern(&result.public_key, &request.pattern, request.position) {
            return Err(ClientError::ResultMismatch {
                public_key: result.public_key,
                pattern: request.pattern.clone(),
            });
        }
        Ok(result)
    }

    /// Ask the server to cancel a job. Best-effort; the job may complete
    /// before the cancellation is observed.
    pub async fn cancel_job(&self, handle: &JobHandle) -> Result<(), ClientError> {
        self.api.cancel(&handle.job_id).await
    }

    /// Check server liveness.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.api.health().await
    }
}

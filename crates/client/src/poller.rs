//! Status polling loop for a submitted job.
//!
//! [`poll_job`] queries `GET /status/{job_id}` at a fixed interval until a
//! terminal status is observed, the caller cancels, or the configured
//! deadline or attempt budget runs out. Classification is fail-closed:
//! any status other than `running` or `complete` ends the loop with
//! [`ClientError::JobFailed`], and once a terminal status is observed the
//! job identifier is never queried again.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use vanity_core::status::{JobState, StatusResponse};
use vanity_core::types::{AddressResult, JobHandle};

use crate::api::GeneratorApi;
use crate::error::ClientError;
use crate::events::JobEvent;

/// Tunable parameters for the polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive status queries.
    pub interval: Duration,
    /// Wall-clock budget for the whole poll. `None` polls until a terminal
    /// status is observed.
    pub deadline: Option<Duration>,
    /// Upper bound on status queries. `None` means unbounded.
    pub max_attempts: Option<u32>,
    /// Consecutive transport failures tolerated on the idempotent status
    /// read before giving up. Submission is never retried here.
    pub transport_retries: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            deadline: None,
            max_attempts: None,
            transport_retries: 3,
        }
    }
}

/// Poll a job until it reaches a terminal state, blocking the calling task.
///
/// Emits [`JobEvent`]s on `event_tx` as status queries resolve; send
/// errors (no subscribers) are ignored. Returns the extracted
/// [`AddressResult`] on `complete`, or the appropriate [`ClientError`] for
/// every other outcome. If `cancel` trips, returns
/// [`ClientError::Cancelled`] without contacting the server again.
pub async fn poll_job(
    api: &GeneratorApi,
    handle: &JobHandle,
    config: &PollConfig,
    cancel: &CancellationToken,
    event_tx: &broadcast::Sender<JobEvent>,
) -> Result<AddressResult, ClientError> {
    let started = Instant::now();
    let mut attempts = 0u32;
    let mut transport_failures = 0u32;

    loop {
        if cancel.is_cancelled() {
            let _ = event_tx.send(JobEvent::Cancelled {
                job_id: handle.job_id.clone(),
            });
            return Err(ClientError::Cancelled);
        }

        if let Some(max) = config.max_attempts {
            if attempts >= max {
                return Err(ClientError::DeadlineExceeded { attempts });
            }
        }
        if let Some(deadline) = config.deadline {
            if started.elapsed() >= deadline {
                return Err(ClientError::DeadlineExceeded { attempts });
            }
        }

        attempts += 1;
        let payload = match api.job_status(&handle.job_id).await {
            Ok(payload) => {
                transport_failures = 0;
                payload
            }
            Err(ClientError::Transport(e)) if transport_failures < config.transport_retries => {
                // Status reads are idempotent, so a bounded retry is safe.
                transport_failures += 1;
                tracing::warn!(
                    job_id = %handle.job_id,
                    retry = transport_failures,
                    error = %e,
                    "Status query failed, retrying",
                );
                if !wait_interval(config.interval, cancel).await {
                    let _ = event_tx.send(JobEvent::Cancelled {
                        job_id: handle.job_id.clone(),
                    });
                    return Err(ClientError::Cancelled);
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        let status = StatusResponse::parse(&payload);
        match status.state() {
            JobState::Running => {
                tracing::debug!(job_id = %handle.job_id, "Job still running");
                let _ = event_tx.send(JobEvent::StatusUpdate {
                    job_id: handle.job_id.clone(),
                    state: JobState::Running,
                    progress: status.progress,
                });
                if !wait_interval(config.interval, cancel).await {
                    let _ = event_tx.send(JobEvent::Cancelled {
                        job_id: handle.job_id.clone(),
                    });
                    return Err(ClientError::Cancelled);
                }
            }
            JobState::Complete => {
                let result = extract_result(&payload)?;
                tracing::info!(
                    job_id = %handle.job_id,
                    public_key = %result.public_key,
                    "Job complete",
                );
                let _ = event_tx.send(JobEvent::Completed {
                    job_id: handle.job_id.clone(),
                });
                return Ok(result);
            }
            state => {
                // Terminal or unrecognized status: fail closed, carrying
                // the server's raw payload.
                tracing::error!(job_id = %handle.job_id, %state, "Job ended without a result");
                let _ = event_tx.send(JobEvent::Failed {
                    job_id: handle.job_id.clone(),
                    status: status.status.clone().unwrap_or_default(),
                });
                return Err(ClientError::JobFailed { payload });
            }
        }
    }
}

/// Sleep for `interval`, respecting cancellation.
///
/// Returns `false` if the token tripped before the sleep finished.
async fn wait_interval(interval: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(interval) => true,
    }
}

/// Extract the key material from a `complete` status payload.
///
/// Fails with [`ClientError::MalformedResult`] when the `result` field is
/// absent or not the expected shape — never returns a partial result.
fn extract_result(payload: &serde_json::Value) -> Result<AddressResult, ClientError> {
    let result = payload.get("result").ok_or_else(|| {
        ClientError::MalformedResult("complete status without a result field".into())
    })?;
    serde_json::from_value(result.clone())
        .map_err(|e| ClientError::MalformedResult(format!("result field: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_channel() -> broadcast::Sender<JobEvent> {
        let (tx, _) = broadcast::channel(16);
        tx
    }

    #[test]
    fn default_config_polls_every_second_without_bounds() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_secs(1));
        assert!(config.deadline.is_none());
        assert!(config.max_attempts.is_none());
    }

    #[test]
    fn extract_result_returns_key_material() {
        let payload = serde_json::json!({
            "status": "complete",
            "result": {"public_key": "abc9fXk", "private_key": "5Kd"},
        });
        let result = extract_result(&payload).unwrap();
        assert_eq!(result.public_key, "abc9fXk");
        assert_eq!(result.private_key, "5Kd");
    }

    #[test]
    fn extract_result_rejects_missing_field() {
        let payload = serde_json::json!({"status": "complete"});
        assert_matches!(
            extract_result(&payload),
            Err(ClientError::MalformedResult(_))
        );
    }

    #[test]
    fn extract_result_rejects_partial_result() {
        let payload = serde_json::json!({
            "status": "complete",
            "result": {"public_key": "abc9fXk"},
        });
        assert_matches!(
            extract_result(&payload),
            Err(ClientError::MalformedResult(_))
        );
    }

    #[tokio::test]
    async fn cancelled_token_returns_without_querying() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        // The address is unreachable: if the poller tried to query it, the
        // error would be Transport, not Cancelled.
        let api = GeneratorApi::new("http://127.0.0.1:1");
        let handle = JobHandle::new("J1");
        let tx = test_channel();
        let mut rx = tx.subscribe();

        let result = poll_job(&api, &handle, &PollConfig::default(), &cancel, &tx).await;
        assert_matches!(result, Err(ClientError::Cancelled));
        assert_matches!(rx.try_recv(), Ok(JobEvent::Cancelled { job_id }) if job_id == "J1");
    }

    #[tokio::test]
    async fn exhausted_attempt_budget_gives_up_before_querying() {
        let api = GeneratorApi::new("http://127.0.0.1:1");
        let handle = JobHandle::new("J1");
        let config = PollConfig {
            max_attempts: Some(0),
            ..Default::default()
        };

        let result = poll_job(&api, &handle, &config, &CancellationToken::new(), &test_channel()).await;
        assert_matches!(result, Err(ClientError::DeadlineExceeded { attempts: 0 }));
    }

    #[tokio::test]
    async fn transport_errors_surface_after_retries() {
        let api = GeneratorApi::new("http://127.0.0.1:1");
        let handle = JobHandle::new("J1");
        let config = PollConfig {
            interval: Duration::from_millis(1),
            transport_retries: 2,
            ..Default::default()
        };

        let result = poll_job(&api, &handle, &config, &CancellationToken::new(), &test_channel()).await;
        assert_matches!(result, Err(ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn cancellation_interrupts_the_sleep() {
        let api = GeneratorApi::new("http://127.0.0.1:1");
        let handle = JobHandle::new("J1");
        // A long interval between transport retries: only cancellation can
        // end the test quickly.
        let config = PollConfig {
            interval: Duration::from_secs(3600),
            transport_retries: 10,
            ..Default::default()
        };

        let cancel = CancellationToken::new();
        let trip = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trip.cancel();
        });

        let result = poll_job(&api, &handle, &config, &cancel, &test_channel()).await;
        assert_matches!(result, Err(ClientError::Cancelled));
    }
}

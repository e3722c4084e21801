// Status Poller - drives one poll session to its terminal state
//
// Queries are strictly sequential: the next one is only scheduled after
// the previous response (or failure) has been processed, so observations
// for one session can never reorder.

use crate::application::cancel::CancelToken;
use crate::application::retry::{RetryDecision, TransportRetryPolicy};
use crate::domain::{JobStatus, StatusDto};
use crate::error::TransportError;
use crate::port::ReportTransport;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Per-session polling parameters
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive status queries
    pub interval: Duration,
    /// Retry budget for failed queries (0 = fail fast)
    pub max_transport_retries: u32,
    /// Base delay for retry backoff
    pub retry_base_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_transport_retries: 0,
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
        }
    }
}

/// Observer surface shared by real and simulated sessions.
///
/// `on_progress` is level-triggered: repeated snapshots with unchanged
/// progress are delivered again, not deduplicated. Exactly one of
/// `on_complete` / `on_error` fires per session, always last.
pub trait StatusObserver: Send + Sync {
    fn on_progress(&self, status: &JobStatus);
    fn on_complete(&self, status: &JobStatus);
    fn on_error(&self, message: &str);
}

/// How a session ended. `Cancelled` means the session was discarded
/// without any terminal callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Failed,
    Cancelled,
}

/// Polls one job id until a terminal state is reached
pub struct StatusPoller {
    transport: Arc<dyn ReportTransport>,
    config: PollConfig,
}

impl StatusPoller {
    pub fn new(transport: Arc<dyn ReportTransport>, config: PollConfig) -> Self {
        Self { transport, config }
    }

    /// Run the session to its end. Invariants:
    /// - queries never overlap
    /// - observed progress is non-decreasing
    /// - exactly one terminal callback, unless cancelled (then none)
    pub async fn run(
        &self,
        job_id: &str,
        observer: &dyn StatusObserver,
        mut cancel: CancelToken,
    ) -> SessionEnd {
        let retry_policy = TransportRetryPolicy::new(
            self.config.max_transport_retries,
            self.config.retry_base_delay,
        );
        let mut progress_floor: u8 = 0;
        let mut failed_queries: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                debug!(job_id = %job_id, "Poll session cancelled before query");
                return SessionEnd::Cancelled;
            }

            match self.query(job_id).await {
                Ok(JobStatus::Completed { result }) => {
                    let status = JobStatus::Completed { result };
                    info!(job_id = %job_id, "Report job completed");
                    observer.on_complete(&status);
                    return SessionEnd::Completed;
                }
                Ok(JobStatus::Failed { error }) => {
                    warn!(job_id = %job_id, error = %error, "Report job failed");
                    observer.on_error(&error);
                    return SessionEnd::Failed;
                }
                Ok(status) => {
                    failed_queries = 0;
                    let status = status.with_progress_floor(progress_floor);
                    progress_floor = status.progress().unwrap_or(progress_floor);
                    debug!(
                        job_id = %job_id,
                        status = %status,
                        progress = %progress_floor,
                        "Report job in progress"
                    );
                    observer.on_progress(&status);

                    tokio::select! {
                        _ = sleep(self.config.interval) => {}
                        _ = cancel.wait() => {
                            debug!(job_id = %job_id, "Poll session cancelled during interval");
                            return SessionEnd::Cancelled;
                        }
                    }
                }
                Err(e) => {
                    // Authentication failures invalidate credentials in the
                    // transport and are never retried
                    if e.is_auth() {
                        warn!(job_id = %job_id, "Authentication failure during polling");
                        observer.on_error(&e.to_string());
                        return SessionEnd::Failed;
                    }

                    failed_queries += 1;
                    match retry_policy.decide(failed_queries, job_id) {
                        RetryDecision::Retry(delay) => {
                            tokio::select! {
                                _ = sleep(delay) => {}
                                _ = cancel.wait() => {
                                    debug!(job_id = %job_id, "Poll session cancelled during retry backoff");
                                    return SessionEnd::Cancelled;
                                }
                            }
                        }
                        RetryDecision::GiveUp => {
                            warn!(job_id = %job_id, error = %e, "Status query failed, ending session");
                            observer.on_error(&e.to_string());
                            return SessionEnd::Failed;
                        }
                    }
                }
            }
        }
    }

    /// One status round-trip. Malformed payloads are rejected here so the
    /// observer only ever sees validated statuses.
    async fn query(&self, job_id: &str) -> Result<JobStatus, TransportError> {
        let dto: StatusDto = self.transport.report_status(job_id).await?;
        JobStatus::try_from(dto).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

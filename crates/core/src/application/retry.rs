// Transport retry policy for status queries
//
// Fail-fast is the default: a single query failure ends the session.
// Callers may grant a retry budget, in which case failed queries back off
// exponentially with deterministic per-job jitter.

use std::time::Duration;
use tracing::{info, warn};

const BACKOFF_FACTOR: f64 = 2.0;

/// Retry decision result
#[derive(Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry the query after the given delay
    Retry(Duration),
    /// Budget spent, surface the failure and end the session
    GiveUp,
}

pub struct TransportRetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl TransportRetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Decide what to do after the `failed_queries`-th consecutive query
    /// failure (1-based) for `job_id`.
    ///
    /// Backoff formula: delay = base_delay * (factor ^ (failures - 1)),
    /// with ±10% jitter seeded by the job id so concurrent sessions for
    /// different jobs do not retry in lockstep.
    pub fn decide(&self, failed_queries: u32, job_id: &str) -> RetryDecision {
        if failed_queries > self.max_retries {
            if self.max_retries > 0 {
                warn!(
                    job_id = %job_id,
                    failures = %failed_queries,
                    max_retries = %self.max_retries,
                    "Transport retry budget spent"
                );
            }
            return RetryDecision::GiveUp;
        }

        let exponent = failed_queries.saturating_sub(1).min(16);
        let base_ms = self.base_delay.as_millis() as f64 * BACKOFF_FACTOR.powi(exponent as i32);

        // Deterministic jitter: 0.9 to 1.1, seeded by the job id
        let jitter_seed = job_id.chars().map(|c| c as u32).sum::<u32>();
        let jitter_factor = 0.9 + ((jitter_seed % 21) as f64 / 100.0);

        let delay = Duration::from_millis((base_ms * jitter_factor) as u64);

        info!(
            job_id = %job_id,
            failures = %failed_queries,
            max_retries = %self.max_retries,
            delay_ms = %delay.as_millis(),
            "Scheduling status query retry"
        );

        RetryDecision::Retry(delay)
    }
}

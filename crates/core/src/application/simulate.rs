// Fallback Simulator - synthetic progress when the service is unreachable
//
// Drop-in substitute for a real poll session: same observer surface, same
// invariants (monotonic progress, single terminal transition). Downstream
// code cannot tell a simulated job from a real one. Pure local
// computation; it never fails.

use crate::application::cancel::CancelToken;
use crate::application::poll::{SessionEnd, StatusObserver};
use crate::domain::{JobId, JobStatus, ReportKind};
use crate::port::IdProvider;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

pub const DEFAULT_SIM_STEP: u8 = 10;
pub const DEFAULT_SIM_TICK_MS: u64 = 300;
pub const DEFAULT_SIM_FINISH_DELAY_MS: u64 = 500;

/// Synthetic sequence parameters. Ticks are deliberately shorter than a
/// real poll interval so the fallback feels responsive.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Progress increment per tick, in percentage points
    pub step: u8,
    /// Delay between progress ticks
    pub tick: Duration,
    /// Delay between reaching 100 and the completed transition
    pub finish_delay: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_SIM_STEP,
            tick: Duration::from_millis(DEFAULT_SIM_TICK_MS),
            finish_delay: Duration::from_millis(DEFAULT_SIM_FINISH_DELAY_MS),
        }
    }
}

pub struct FallbackSimulator {
    id_provider: Arc<dyn IdProvider>,
    config: SimulatorConfig,
}

impl FallbackSimulator {
    pub fn new(id_provider: Arc<dyn IdProvider>, config: SimulatorConfig) -> Self {
        Self {
            id_provider,
            config,
        }
    }

    /// Produce the synthetic sequence: Processing at step, 2*step, ... 100,
    /// then Completed after one final short delay. Returns the locally
    /// assigned job id together with how the session ended.
    pub async fn run(
        &self,
        kind: &ReportKind,
        observer: &dyn StatusObserver,
        mut cancel: CancelToken,
    ) -> (JobId, SessionEnd) {
        let job_id = self.id_provider.generate_id();
        info!(job_id = %job_id, kind = %kind, "Running simulated report session");

        // step 0 would never reach 100
        let step = self.config.step.max(1);
        let mut progress: u8 = 0;

        while progress < 100 {
            if cancel.is_cancelled() {
                debug!(job_id = %job_id, "Simulated session cancelled");
                return (job_id, SessionEnd::Cancelled);
            }
            tokio::select! {
                _ = sleep(self.config.tick) => {}
                _ = cancel.wait() => {
                    debug!(job_id = %job_id, "Simulated session cancelled during tick");
                    return (job_id, SessionEnd::Cancelled);
                }
            }
            progress = progress.saturating_add(step).min(100);
            observer.on_progress(&JobStatus::Processing { progress });
        }

        tokio::select! {
            _ = sleep(self.config.finish_delay) => {}
            _ = cancel.wait() => {
                debug!(job_id = %job_id, "Simulated session cancelled before completion");
                return (job_id, SessionEnd::Cancelled);
            }
        }

        let status = JobStatus::Completed {
            result: json!({
                "report_id": job_id,
                "report_type": kind.as_str(),
                "simulated": true,
            }),
        };
        info!(job_id = %job_id, "Simulated report session completed");
        observer.on_complete(&status);

        (job_id, SessionEnd::Completed)
    }
}

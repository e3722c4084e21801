// Report Generation Orchestrator
//
// Submitter -> Poller handoff, with transparent fallback to the local
// simulator when submission fails. The generator is the sole creator of
// poll sessions, so one job id never has two active sessions.

use crate::application::cancel::CancelToken;
use crate::application::poll::{PollConfig, SessionEnd, StatusObserver, StatusPoller};
use crate::application::simulate::{FallbackSimulator, SimulatorConfig};
use crate::application::submit;
use crate::domain::{JobId, ReportKind};
use crate::error::SubmitError;
use crate::port::id_provider::UuidProvider;
use crate::port::time_provider::SystemTimeProvider;
use crate::port::{IdProvider, ReportTransport, TimeProvider};
use std::sync::Arc;
use tracing::warn;

/// Where the observed session actually ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOrigin {
    Remote(JobId),
    Simulated(JobId),
}

impl JobOrigin {
    pub fn job_id(&self) -> &str {
        match self {
            JobOrigin::Remote(id) | JobOrigin::Simulated(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub origin: JobOrigin,
    pub end: SessionEnd,
}

pub struct ReportGenerator {
    transport: Arc<dyn ReportTransport>,
    time_provider: Arc<dyn TimeProvider>,
    poller: StatusPoller,
    simulator: FallbackSimulator,
}

impl ReportGenerator {
    pub fn new(
        transport: Arc<dyn ReportTransport>,
        time_provider: Arc<dyn TimeProvider>,
        id_provider: Arc<dyn IdProvider>,
        poll_config: PollConfig,
        simulator_config: SimulatorConfig,
    ) -> Self {
        Self {
            transport: Arc::clone(&transport),
            time_provider,
            poller: StatusPoller::new(transport, poll_config),
            simulator: FallbackSimulator::new(id_provider, simulator_config),
        }
    }

    /// Production wiring: system clock, uuid ids, default intervals.
    pub fn with_defaults(transport: Arc<dyn ReportTransport>) -> Self {
        Self::new(
            transport,
            Arc::new(SystemTimeProvider),
            Arc::new(UuidProvider),
            PollConfig::default(),
            SimulatorConfig::default(),
        )
    }

    /// Submit and poll. Submission failures surface to the caller.
    pub async fn generate(
        &self,
        subject_id: &str,
        kind: ReportKind,
        observer: &dyn StatusObserver,
        cancel: CancelToken,
    ) -> Result<ReportOutcome, SubmitError> {
        let job = submit::execute(
            self.transport.as_ref(),
            self.time_provider.as_ref(),
            subject_id,
            kind,
        )
        .await?;

        let end = self.poller.run(&job.job_id, observer, cancel).await;
        Ok(ReportOutcome {
            origin: JobOrigin::Remote(job.job_id),
            end,
        })
    }

    /// Submit and poll, substituting the simulator if submission fails.
    /// Authentication failures are NOT recovered: the credential is gone
    /// and the caller must reauthenticate.
    pub async fn generate_with_fallback(
        &self,
        subject_id: &str,
        kind: ReportKind,
        observer: &dyn StatusObserver,
        cancel: CancelToken,
    ) -> Result<ReportOutcome, SubmitError> {
        match submit::execute(
            self.transport.as_ref(),
            self.time_provider.as_ref(),
            subject_id,
            kind.clone(),
        )
        .await
        {
            Ok(job) => {
                let end = self.poller.run(&job.job_id, observer, cancel).await;
                Ok(ReportOutcome {
                    origin: JobOrigin::Remote(job.job_id),
                    end,
                })
            }
            Err(e) if e.is_auth() => Err(e),
            Err(e) => {
                warn!(error = %e, "Submission failed, substituting simulated session");
                let (job_id, end) = self.simulator.run(&kind, observer, cancel).await;
                Ok(ReportOutcome {
                    origin: JobOrigin::Simulated(job_id),
                    end,
                })
            }
        }
    }
}

// Submit Use Case
//
// Issues exactly one create-report request. No retry at this layer: the
// caller decides whether a failed submission is fatal or falls back to
// the local simulator.

use crate::domain::{ReportKind, SubmittedJob};
use crate::error::SubmitError;
use crate::port::{ReportTransport, SubmitRequest, TimeProvider};
use tracing::info;

/// Execute the submit use case.
///
/// # Arguments
///
/// * `transport` - Report service transport
/// * `time_provider` - Time provider (injected for determinism)
/// * `subject_id` - Entity the report concerns (`"current"` sentinel allowed)
/// * `kind` - Report kind, passed through unvalidated
pub async fn execute(
    transport: &dyn ReportTransport,
    time_provider: &dyn TimeProvider,
    subject_id: impl Into<String>,
    kind: ReportKind,
) -> Result<SubmittedJob, SubmitError> {
    let subject_id = subject_id.into();
    let request = SubmitRequest {
        subject_id: subject_id.clone(),
        kind: kind.clone(),
    };

    let ack = transport.submit_report(&request).await?;
    if ack.task_id.is_empty() {
        return Err(SubmitError::EmptyJobId);
    }

    info!(
        job_id = %ack.task_id,
        subject = %subject_id,
        kind = %kind,
        "Report job submitted"
    );

    Ok(SubmittedJob {
        job_id: ack.task_id,
        subject_id,
        kind,
        submitted_at: time_provider.now_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::port::transport::mocks::MockTransport;
    use crate::port::SubmitAck;

    struct FixedTime(i64);
    impl TimeProvider for FixedTime {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    #[tokio::test]
    async fn submit_returns_job_with_assigned_id() {
        let transport = MockTransport::accepting("job-1");
        let job = execute(&transport, &FixedTime(5000), "42", ReportKind::Performance)
            .await
            .unwrap();

        assert_eq!(job.job_id, "job-1");
        assert_eq!(job.subject_id, "42");
        assert_eq!(job.submitted_at, 5000);
        assert_eq!(transport.submit_calls(), 1);
    }

    #[tokio::test]
    async fn submit_rejects_empty_task_id() {
        let transport = MockTransport::new(Ok(SubmitAck {
            task_id: String::new(),
        }));
        let err = execute(&transport, &FixedTime(0), "42", ReportKind::Endorsement)
            .await
            .unwrap_err();
        assert_eq!(err, SubmitError::EmptyJobId);
    }

    #[tokio::test]
    async fn submit_surfaces_transport_errors_without_retrying() {
        let transport =
            MockTransport::rejecting(TransportError::Network("connection refused".to_string()));
        let err = execute(&transport, &FixedTime(0), "current", ReportKind::Comprehensive)
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(transport.submit_calls(), 1);
    }
}

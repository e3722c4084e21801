// Report Transport Port
// Abstraction over the remote report service. Implementations own the
// actual protocol; the core only sees typed requests and wire payloads.

use crate::domain::{ReportKind, ReportSummary, StatusDto};
use crate::error::TransportError;
use async_trait::async_trait;
use serde::Serialize;

/// Create-report request. Field names follow the service wire format.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    #[serde(rename = "student_id")]
    pub subject_id: String,
    #[serde(rename = "report_type")]
    pub kind: ReportKind,
}

/// Acknowledgement of a create-report request. Extra response fields are
/// ignored; only the assigned task id matters to the caller.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SubmitAck {
    pub task_id: String,
}

/// Report Transport trait
///
/// Implementations:
/// - HttpReportTransport (infra-http): reqwest against the REST endpoints
/// - mocks::MockTransport: scripted responses for tests
#[async_trait]
pub trait ReportTransport: Send + Sync {
    /// Issue exactly one create-report request.
    async fn submit_report(&self, request: &SubmitRequest) -> Result<SubmitAck, TransportError>;

    /// Query the current status of a job. Returns the raw wire payload;
    /// validation into `JobStatus` happens in the poller.
    async fn report_status(&self, job_id: &str) -> Result<StatusDto, TransportError>;

    /// List previously generated reports.
    async fn list_reports(&self) -> Result<Vec<ReportSummary>, TransportError>;

    /// Fetch the full document of a completed report.
    async fn fetch_report(&self, job_id: &str) -> Result<serde_json::Value, TransportError>;
}

// ============================================================================
// Mock Implementation for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted transport for tests: submission behavior is fixed at
    /// construction, status responses are consumed front-to-back.
    pub struct MockTransport {
        submit_response: Result<SubmitAck, TransportError>,
        status_script: Mutex<VecDeque<Result<StatusDto, TransportError>>>,
        reports: Mutex<Vec<ReportSummary>>,
        submit_calls: Mutex<usize>,
        status_calls: Mutex<usize>,
    }

    impl MockTransport {
        pub fn new(submit_response: Result<SubmitAck, TransportError>) -> Self {
            Self {
                submit_response,
                status_script: Mutex::new(VecDeque::new()),
                reports: Mutex::new(Vec::new()),
                submit_calls: Mutex::new(0),
                status_calls: Mutex::new(0),
            }
        }

        pub fn accepting(job_id: impl Into<String>) -> Self {
            Self::new(Ok(SubmitAck {
                task_id: job_id.into(),
            }))
        }

        pub fn rejecting(error: TransportError) -> Self {
            Self::new(Err(error))
        }

        /// Append one status response to the script.
        pub fn push_status(&self, response: Result<StatusDto, TransportError>) -> &Self {
            self.status_script.lock().unwrap().push_back(response);
            self
        }

        pub fn set_reports(&self, reports: Vec<ReportSummary>) {
            *self.reports.lock().unwrap() = reports;
        }

        pub fn submit_calls(&self) -> usize {
            *self.submit_calls.lock().unwrap()
        }

        pub fn status_calls(&self) -> usize {
            *self.status_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ReportTransport for MockTransport {
        async fn submit_report(
            &self,
            _request: &SubmitRequest,
        ) -> Result<SubmitAck, TransportError> {
            *self.submit_calls.lock().unwrap() += 1;
            self.submit_response.clone()
        }

        async fn report_status(&self, _job_id: &str) -> Result<StatusDto, TransportError> {
            *self.status_calls.lock().unwrap() += 1;
            self.status_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(TransportError::Network(
                        "mock status script exhausted".to_string(),
                    ))
                })
        }

        async fn list_reports(&self) -> Result<Vec<ReportSummary>, TransportError> {
            Ok(self.reports.lock().unwrap().clone())
        }

        async fn fetch_report(&self, job_id: &str) -> Result<serde_json::Value, TransportError> {
            Ok(serde_json::json!({ "task_id": job_id }))
        }
    }
}

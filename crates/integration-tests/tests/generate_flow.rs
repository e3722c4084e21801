// End-to-end generation flow: submit -> poll, with fallback substitution

mod common;

use async_trait::async_trait;
use common::*;
use scholaris_core::application::{
    cancel_channel, JobOrigin, ReportGenerator, SessionEnd, SimulatorConfig,
};
use scholaris_core::domain::{ReportKind, ReportSummary, StatusDto};
use scholaris_core::error::{SubmitError, TransportError};
use scholaris_core::port::transport::mocks::MockTransport;
use scholaris_core::port::{ReportTransport, SubmitAck, SubmitRequest};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn fast_sim_config() -> SimulatorConfig {
    SimulatorConfig {
        step: 10,
        tick: Duration::from_millis(1),
        finish_delay: Duration::from_millis(1),
    }
}

fn generator(transport: Arc<dyn ReportTransport>) -> ReportGenerator {
    ReportGenerator::new(
        transport,
        Arc::new(FixedTime(1000)),
        Arc::new(FixedIds("sim-1")),
        fast_poll_config(),
        fast_sim_config(),
    )
}

/// Transport that records the order of calls made against it.
struct CallLogTransport {
    calls: Mutex<Vec<&'static str>>,
    statuses: Mutex<VecDeque<StatusDto>>,
}

impl CallLogTransport {
    fn new(statuses: Vec<StatusDto>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            statuses: Mutex::new(statuses.into()),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportTransport for CallLogTransport {
    async fn submit_report(&self, _request: &SubmitRequest) -> Result<SubmitAck, TransportError> {
        self.calls.lock().unwrap().push("submit");
        Ok(SubmitAck {
            task_id: "job-1".to_string(),
        })
    }

    async fn report_status(&self, _job_id: &str) -> Result<StatusDto, TransportError> {
        self.calls.lock().unwrap().push("status");
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Network("script exhausted".to_string()))
    }

    async fn list_reports(&self) -> Result<Vec<ReportSummary>, TransportError> {
        Ok(Vec::new())
    }

    async fn fetch_report(&self, _job_id: &str) -> Result<serde_json::Value, TransportError> {
        Ok(json!({}))
    }
}

#[tokio::test]
async fn submission_completes_before_any_status_query() {
    let transport = Arc::new(CallLogTransport::new(vec![
        queued(0),
        completed(json!({})),
    ]));
    let observer = RecordingObserver::new();
    let (_handle, token) = cancel_channel();

    let outcome = generator(Arc::clone(&transport) as Arc<dyn ReportTransport>)
        .generate("42", ReportKind::Performance, &observer, token)
        .await
        .unwrap();

    assert_eq!(outcome.origin, JobOrigin::Remote("job-1".to_string()));
    assert_eq!(outcome.end, SessionEnd::Completed);
    assert_eq!(transport.calls(), vec!["submit", "status", "status"]);
    assert_session_properties(&observer.events());
}

#[tokio::test]
async fn failed_submission_substitutes_the_simulator() {
    let transport = Arc::new(MockTransport::rejecting(TransportError::Network(
        "connection refused".to_string(),
    )));
    let observer = RecordingObserver::new();
    let (_handle, token) = cancel_channel();

    let outcome = generator(Arc::clone(&transport) as Arc<dyn ReportTransport>)
        .generate_with_fallback("42", ReportKind::Performance, &observer, token)
        .await
        .unwrap();

    assert_eq!(outcome.origin, JobOrigin::Simulated("sim-1".to_string()));
    assert_eq!(outcome.end, SessionEnd::Completed);
    assert_eq!(transport.status_calls(), 0, "no polling of the real service");

    // identical contract: the observer cannot tell this session was synthetic
    let events = observer.events();
    assert_session_properties(&events);
    assert!(matches!(events.last(), Some(Event::Complete(_))));
}

#[tokio::test]
async fn authentication_failure_is_not_recovered_by_fallback() {
    let transport = Arc::new(MockTransport::rejecting(TransportError::Unauthorized));
    let observer = RecordingObserver::new();
    let (_handle, token) = cancel_channel();

    let err = generator(Arc::clone(&transport) as Arc<dyn ReportTransport>)
        .generate_with_fallback("42", ReportKind::Performance, &observer, token)
        .await
        .unwrap_err();

    assert_eq!(err, SubmitError::Transport(TransportError::Unauthorized));
    assert!(observer.events().is_empty(), "no session was started");
}

#[tokio::test]
async fn generate_without_fallback_surfaces_submit_errors() {
    let transport = Arc::new(MockTransport::rejecting(TransportError::Status {
        status: 500,
        message: "internal error".to_string(),
    }));
    let observer = RecordingObserver::new();
    let (_handle, token) = cancel_channel();

    let err = generator(Arc::clone(&transport) as Arc<dyn ReportTransport>)
        .generate("42", ReportKind::Comprehensive, &observer, token)
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Transport(_)));
    assert_eq!(transport.status_calls(), 0);
    assert!(observer.events().is_empty());
}

#[tokio::test]
async fn remote_job_failure_does_not_trigger_the_simulator() {
    let transport = Arc::new(MockTransport::accepting("job-1"));
    transport.push_status(Ok(failed("quota exceeded")));

    let observer = RecordingObserver::new();
    let (_handle, token) = cancel_channel();

    let outcome = generator(Arc::clone(&transport) as Arc<dyn ReportTransport>)
        .generate_with_fallback("42", ReportKind::Endorsement, &observer, token)
        .await
        .unwrap();

    // the job was submitted; its failure is a real terminal outcome,
    // not a submission failure, so no substitution happens
    assert_eq!(outcome.origin, JobOrigin::Remote("job-1".to_string()));
    assert_eq!(outcome.end, SessionEnd::Failed);
    assert_eq!(
        observer.events(),
        vec![Event::Error("quota exceeded".to_string())]
    );
}

// Shared test fixtures for session-level tests
#![allow(dead_code)]

use scholaris_core::application::{PollConfig, StatusObserver};
use scholaris_core::domain::{JobStatus, StatusDto};
use scholaris_core::port::{IdProvider, TimeProvider};
use std::sync::Mutex;
use std::time::Duration;

/// Everything a session reported, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Progress(JobStatus),
    Complete(JobStatus),
    Error(String),
}

impl Event {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Complete(_) | Event::Error(_))
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl StatusObserver for RecordingObserver {
    fn on_progress(&self, status: &JobStatus) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Progress(status.clone()));
    }

    fn on_complete(&self, status: &JobStatus) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Complete(status.clone()));
    }

    fn on_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Error(message.to_string()));
    }
}

/// The three session properties every session (real or simulated) must
/// satisfy once it reaches a terminal state:
/// 1. exactly one terminal event, and it is the last event
/// 2. observed progress is non-decreasing
/// 3. a completed session reports progress 100 at completion
pub fn assert_session_properties(events: &[Event]) {
    let terminal_count = events.iter().filter(|e| e.is_terminal()).count();
    assert_eq!(terminal_count, 1, "expected exactly one terminal event");
    assert!(
        events.last().map(Event::is_terminal).unwrap_or(false),
        "terminal event must come last"
    );

    let mut floor = 0u8;
    for event in events {
        if let Event::Progress(status) = event {
            let progress = status.progress().expect("progress event without progress");
            assert!(
                progress >= floor,
                "progress regressed from {} to {}",
                floor,
                progress
            );
            floor = progress;
        }
    }

    if let Some(Event::Complete(status)) = events.last() {
        assert_eq!(status.progress(), Some(100));
    }
}

// --- wire payload builders -------------------------------------------------

pub fn queued(progress: i64) -> StatusDto {
    StatusDto {
        status: "queued".to_string(),
        progress: Some(progress),
        ..StatusDto::default()
    }
}

pub fn processing(progress: i64) -> StatusDto {
    StatusDto {
        status: "processing".to_string(),
        progress: Some(progress),
        ..StatusDto::default()
    }
}

pub fn completed(result: serde_json::Value) -> StatusDto {
    StatusDto {
        status: "completed".to_string(),
        progress: Some(100),
        result: Some(result),
        ..StatusDto::default()
    }
}

pub fn failed(error: &str) -> StatusDto {
    StatusDto {
        status: "failed".to_string(),
        error: Some(error.to_string()),
        ..StatusDto::default()
    }
}

// --- deterministic providers and fast configs ------------------------------

pub struct FixedTime(pub i64);

impl TimeProvider for FixedTime {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

pub struct FixedIds(pub &'static str);

impl IdProvider for FixedIds {
    fn generate_id(&self) -> String {
        self.0.to_string()
    }
}

/// Millisecond-scale intervals so sessions run to completion quickly.
pub fn fast_poll_config() -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(1),
        max_transport_retries: 0,
        retry_base_delay: Duration::from_millis(1),
    }
}

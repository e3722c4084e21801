// Central Error Types for the Report Client

use thiserror::Error;

/// Transport-level error: a request could not be completed or its
/// response could not be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed")]
    Unauthorized,

    #[error("permission denied")]
    Forbidden,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    /// Authentication failures are terminal: they invalidate credentials
    /// and must never be retried.
    pub fn is_auth(&self) -> bool {
        matches!(self, TransportError::Unauthorized)
    }
}

/// Error raised by the job submitter. The create-report request failed;
/// the caller decides whether to substitute the fallback simulator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("submission response carried an empty task_id")]
    EmptyJobId,
}

impl SubmitError {
    pub fn is_auth(&self) -> bool {
        matches!(self, SubmitError::Transport(e) if e.is_auth())
    }
}

// Job Status Model
//
// Wire payloads are deserialized permissively into `StatusDto` and then
// strictly validated into the closed `JobStatus` variant. Callbacks only
// ever see a fully constructed `JobStatus`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Substitute message when the service reports failure without a reason.
const UNSPECIFIED_FAILURE: &str = "report generation failed";

/// Server-side lifecycle of a report job.
///
/// Exactly one of the terminal variants carries a payload: `Completed`
/// holds the opaque result, `Failed` holds a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobStatus {
    Queued { progress: u8 },
    Processing { progress: u8 },
    Completed { result: serde_json::Value },
    Failed { error: String },
}

impl JobStatus {
    /// Progress percentage, when the notion applies. Completed jobs
    /// always report 100; failed jobs report nothing.
    pub fn progress(&self) -> Option<u8> {
        match self {
            JobStatus::Queued { progress } | JobStatus::Processing { progress } => Some(*progress),
            JobStatus::Completed { .. } => Some(100),
            JobStatus::Failed { .. } => None,
        }
    }

    /// Terminal statuses end a poll session; no further transitions occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed { .. } | JobStatus::Failed { .. })
    }

    /// Raise a non-terminal progress value to `floor`, keeping observed
    /// progress non-decreasing even if the server regresses.
    pub fn with_progress_floor(self, floor: u8) -> JobStatus {
        match self {
            JobStatus::Queued { progress } => JobStatus::Queued {
                progress: progress.max(floor),
            },
            JobStatus::Processing { progress } => JobStatus::Processing {
                progress: progress.max(floor),
            },
            terminal => terminal,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            JobStatus::Queued { .. } => "queued",
            JobStatus::Processing { .. } => "processing",
            JobStatus::Completed { .. } => "completed",
            JobStatus::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind_str())
    }
}

/// Raw status payload as the service sends it. Extra fields are tolerated;
/// validation happens in `JobStatus::try_from`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusDto {
    pub status: String,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Rejection reasons for malformed status payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidStatus {
    #[error("unknown status kind `{0}`")]
    UnknownKind(String),

    #[error("progress {0} out of range [0, 100]")]
    ProgressOutOfRange(i64),

    #[error("completed status missing result payload")]
    MissingResult,
}

impl TryFrom<StatusDto> for JobStatus {
    type Error = InvalidStatus;

    fn try_from(dto: StatusDto) -> Result<Self, Self::Error> {
        match dto.status.as_str() {
            // "pending" is the queued-equivalent spelling some servers use
            "queued" | "pending" => Ok(JobStatus::Queued {
                progress: validate_progress(dto.progress)?,
            }),
            "processing" => Ok(JobStatus::Processing {
                progress: validate_progress(dto.progress)?,
            }),
            "completed" => match dto.result {
                Some(result) => Ok(JobStatus::Completed { result }),
                None => Err(InvalidStatus::MissingResult),
            },
            "failed" => Ok(JobStatus::Failed {
                error: dto
                    .error
                    .unwrap_or_else(|| UNSPECIFIED_FAILURE.to_string()),
            }),
            other => Err(InvalidStatus::UnknownKind(other.to_string())),
        }
    }
}

fn validate_progress(raw: Option<i64>) -> Result<u8, InvalidStatus> {
    // Absent progress means the job has not reported any yet
    let value = raw.unwrap_or(0);
    if !(0..=100).contains(&value) {
        return Err(InvalidStatus::ProgressOutOfRange(value));
    }
    Ok(value as u8)
}

// Report Domain Model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Job ID assigned by the report service (`task_id` on the wire).
/// Opaque, unique per submission, immutable once issued.
pub type JobId = String;

/// Kind of report a job produces.
///
/// Unrecognized kinds are passed through to the service untouched rather
/// than rejected locally; the service owns the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    Performance,
    Endorsement,
    Comprehensive,
    Other(String),
}

impl ReportKind {
    pub fn as_str(&self) -> &str {
        match self {
            ReportKind::Performance => "performance",
            ReportKind::Endorsement => "endorsement",
            ReportKind::Comprehensive => "comprehensive",
            ReportKind::Other(s) => s,
        }
    }
}

impl From<&str> for ReportKind {
    fn from(s: &str) -> Self {
        match s {
            "performance" => ReportKind::Performance,
            "endorsement" => ReportKind::Endorsement,
            "comprehensive" => ReportKind::Comprehensive,
            other => ReportKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ReportKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReportKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ReportKind::from(s.as_str()))
    }
}

/// A successfully submitted job, before any status has been observed.
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    pub job_id: JobId,
    pub subject_id: String,
    pub kind: ReportKind,
    pub submitted_at: i64, // epoch ms
}

/// Identifier of a previously generated report as listed by the service.
/// Numeric for rows stored server-side, textual for task-derived entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportId {
    Text(String),
    Numeric(i64),
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportId::Text(s) => write!(f, "{}", s),
            ReportId::Numeric(n) => write!(f, "{}", n),
        }
    }
}

/// One entry of the report listing endpoint. Fields beyond `id` are
/// optional: the listing is informational and servers differ in what
/// they fill in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: ReportId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}

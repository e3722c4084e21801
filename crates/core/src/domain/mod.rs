// Domain Layer - Report jobs and their status model

pub mod report;
pub mod status;

pub use report::{JobId, ReportId, ReportKind, ReportSummary, SubmittedJob};
pub use status::{InvalidStatus, JobStatus, StatusDto};

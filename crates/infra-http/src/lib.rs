// Scholaris HTTP Infrastructure - ReportTransport over REST

pub mod endpoints;
mod transport;

pub use transport::{HttpReportTransport, HttpTransportConfig};

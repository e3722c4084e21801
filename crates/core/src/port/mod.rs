// Port Layer - Interfaces for external dependencies

pub mod credentials;
pub mod id_provider; // For deterministic testing
pub mod time_provider;
pub mod transport;

// Re-exports
pub use credentials::{CredentialProvider, MemoryTokenStore};
pub use id_provider::IdProvider;
pub use time_provider::TimeProvider;
pub use transport::{ReportTransport, SubmitAck, SubmitRequest};

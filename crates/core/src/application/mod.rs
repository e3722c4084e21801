// Application Layer - Use cases orchestrating the ports

pub mod cancel;
pub mod generate;
pub mod poll;
pub mod retry;
pub mod simulate;
pub mod submit;

pub use cancel::{cancel_channel, CancelHandle, CancelToken};
pub use generate::{JobOrigin, ReportGenerator, ReportOutcome};
pub use poll::{PollConfig, SessionEnd, StatusObserver, StatusPoller};
pub use retry::{RetryDecision, TransportRetryPolicy};
pub use simulate::{FallbackSimulator, SimulatorConfig};

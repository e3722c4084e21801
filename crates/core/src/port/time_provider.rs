// Time Provider Port
//
// Submission stamps `SubmittedJob::submitted_at` through this port, so
// tests can assert exact timestamps instead of racing the system clock.

/// Clock interface (allows a fixed clock in tests)
pub trait TimeProvider: Send + Sync {
    /// Current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// System clock (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

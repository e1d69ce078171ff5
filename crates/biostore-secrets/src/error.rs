//! Error types for secret backends.

use thiserror::Error;

/// Domain reported for failures raised by the OS keyring.
pub const KEYRING_DOMAIN: &str = "keyring";

/// Domain reported for failures raised by the freedesktop secret service.
pub const SECRET_SERVICE_DOMAIN: &str = "secret-service";

/// Domain reported when the task running a backend call fails.
pub const TASK_DOMAIN: &str = "biostore.task";

/// A failure reported by a secret backend.
///
/// Mirrors the shape of a native platform error: the subsystem that raised
/// it, a numeric code within that subsystem, and the native message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({code}) ({domain})")]
pub struct BackendError {
    /// Subsystem that produced the error.
    pub domain: String,

    /// Numeric code within `domain`.
    pub code: i32,

    /// Native error message.
    pub message: String,
}

impl BackendError {
    /// Create a new backend error.
    pub fn new(domain: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            message: message.into(),
        }
    }
}

/// Convenience result alias for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

//! Translation of backend failures into caller-facing errors.

use biostore_secrets::BackendError;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ChannelError;

/// Structured description of a backend failure, sent as error details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredError {
    /// Subsystem that produced the error.
    pub domain: String,

    /// Numeric code within `domain`.
    pub code: i32,

    /// Native error message.
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error.
    pub fn new(domain: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            message: message.into(),
        }
    }
}

impl From<&BackendError> for StructuredError {
    fn from(err: &BackendError) -> Self {
        Self::new(err.domain.clone(), err.code, err.message.clone())
    }
}

/// Turn a backend failure into a `SecurityAccessError`.
///
/// The message reads `"<context>: <native message> (<code>) (<domain>)"` and is
/// logged as a warning before being returned.
pub fn translate(context: &str, error: &BackendError) -> ChannelError {
    let message = format!(
        "{}: {} ({}) ({})",
        context, error.message, error.code, error.domain
    );
    warn!("{}", message);
    ChannelError::SecurityAccess {
        message,
        details: StructuredError::from(error),
    }
}

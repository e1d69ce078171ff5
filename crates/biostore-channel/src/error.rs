//! Channel error types.

use crate::translate::StructuredError;
use thiserror::Error;
use tokio_util::codec::{AnyDelimiterCodecError, LinesCodecError};

/// Error category for argument validation failures.
pub const BAD_ARGUMENTS: &str = "BadArguments";

/// Error category for failures reported by the secret backend.
pub const SECURITY_ACCESS_ERROR: &str = "SecurityAccessError";

/// Error category for failures inside the channel itself.
pub const INTERNAL_ERROR: &str = "InternalError";

/// Errors that can occur while serving a method call.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// Missing or malformed arguments. Raised before any backend call.
    #[error("{0}")]
    BadArguments(String),

    /// The secret backend reported a failure.
    #[error("{message}")]
    SecurityAccess {
        /// Human-readable message embedding context and native details.
        message: String,
        /// The backend's own error description.
        details: StructuredError,
    },

    /// Unknown method name.
    #[error("Method not implemented: {0}")]
    NotImplemented(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Framing or task failure in the transport.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ChannelError {
    /// Get the error category reported to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadArguments(_) => BAD_ARGUMENTS,
            Self::SecurityAccess { .. } => SECURITY_ACCESS_ERROR,
            Self::NotImplemented(_) => "NotImplemented",
            Self::Json(_) | Self::Io(_) | Self::Transport(_) => INTERNAL_ERROR,
        }
    }
}

impl From<LinesCodecError> for ChannelError {
    fn from(err: LinesCodecError) -> Self {
        match err {
            LinesCodecError::Io(e) => Self::Io(e),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<AnyDelimiterCodecError> for ChannelError {
    fn from(err: AnyDelimiterCodecError) -> Self {
        match err {
            AnyDelimiterCodecError::Io(e) => Self::Io(e),
            other => Self::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ChannelError::BadArguments("x".into()).code(), "BadArguments");
        assert_eq!(
            ChannelError::SecurityAccess {
                message: "m".into(),
                details: StructuredError::new("d", 1, "m"),
            }
            .code(),
            "SecurityAccessError"
        );
        assert_eq!(ChannelError::NotImplemented("x".into()).code(), "NotImplemented");
        assert_eq!(ChannelError::Transport("x".into()).code(), "InternalError");
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: ChannelError = LinesCodecError::MaxLineLengthExceeded.into();
        assert!(matches!(err, ChannelError::Transport(_)));

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: ChannelError = LinesCodecError::Io(io).into();
        assert!(matches!(err, ChannelError::Io(_)));

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "reset");
        let err: ChannelError = AnyDelimiterCodecError::Io(io).into();
        assert!(matches!(err, ChannelError::Io(_)));
    }
}

//! Method channel wire types.
//!
//! One request or reply per line:
//!
//! ```text
//! {"id": 7, "method": "read", "args": {"name": "vault1"}}
//! {"id": 7, "status": "success", "result": "secret-xyz"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChannelError, INTERNAL_ERROR};

/// An inbound method call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Caller-chosen correlation ID, echoed on the reply.
    #[serde(default)]
    pub id: serde_json::Value,

    /// Method name.
    pub method: String,

    /// Method arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

impl MethodCall {
    /// Create a new call with no ID and no arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            id: serde_json::Value::Null,
            method: method.into(),
            args: None,
        }
    }

    /// Set the call ID.
    pub fn with_id(mut self, id: impl Into<serde_json::Value>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the arguments.
    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = Some(args);
        self
    }
}

/// The outcome of one method call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    /// The call succeeded.
    Success {
        /// Result value (may be `null`).
        result: serde_json::Value,
    },

    /// The call failed.
    Error {
        /// Error category (`BadArguments`, `SecurityAccessError`, ...).
        code: String,
        /// Human-readable message.
        message: String,
        /// Structured details, if any.
        #[serde(default)]
        details: Option<serde_json::Value>,
    },

    /// The method is not known to this plugin.
    NotImplemented,
}

impl MethodResponse {
    /// Create a success response.
    pub fn success(result: serde_json::Value) -> Self {
        Self::Success { result }
    }

    /// Create an error response.
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    /// Build a response from a handler result.
    pub fn from_result(result: crate::Result<serde_json::Value>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(e) => e.into(),
        }
    }

    /// Check whether this is a success response.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The result value of a success response.
    pub fn result(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success { result } => Some(result),
            _ => None,
        }
    }

    /// The error category of an error response.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Error { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<ChannelError> for MethodResponse {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::NotImplemented(_) => Self::NotImplemented,
            ChannelError::SecurityAccess { message, details } => {
                let details = serde_json::to_value(&details).ok();
                Self::error(crate::error::SECURITY_ACCESS_ERROR, message, details)
            }
            ChannelError::BadArguments(message) => {
                Self::error(crate::error::BAD_ARGUMENTS, message, None)
            }
            other => Self::error(INTERNAL_ERROR, other.to_string(), None),
        }
    }
}

/// A reply line: the call ID plus the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// ID of the call this answers.
    pub id: serde_json::Value,

    /// The response.
    #[serde(flatten)]
    pub response: MethodResponse,
}

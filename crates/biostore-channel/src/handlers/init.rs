//! `init` argument parsing and the authentication guard.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ChannelError;
use crate::Result;

/// Message returned when a caller asks for authentication-gated storage.
pub const AUTH_UNSUPPORTED: &str =
    "this backend only supports non-authenticated secure storage";

/// Options passed to `init`.
///
/// Only `authenticationRequired` matters here; other keys the caller sends
/// (validity durations, prompt strings) are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Whether the caller wants every access gated by user authentication.
    pub authentication_required: bool,
}

impl InitOptions {
    /// Parse the `options` entry from an `init` argument map.
    pub fn from_args(args: Option<&Value>) -> Result<Self> {
        let options = args
            .and_then(Value::as_object)
            .and_then(|map| map.get("options"))
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ChannelError::BadArguments("Argument map missing or malformed".to_string())
            })?;
        Self::from_map(options)
    }

    fn from_map(options: &Map<String, Value>) -> Result<Self> {
        let authentication_required = match options.get("authenticationRequired") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(required)) => *required,
            Some(other) => {
                return Err(ChannelError::BadArguments(format!(
                    "authenticationRequired must be a boolean, got {other}"
                )))
            }
        };
        Ok(Self {
            authentication_required,
        })
    }
}

/// Reject options this backend cannot honour.
///
/// Authentication-gated storage is never available here; this is a fixed
/// capability of the backend, not something a caller can negotiate.
pub fn check_init(options: &InitOptions) -> Result<Value> {
    if options.authentication_required {
        return Err(ChannelError::BadArguments(AUTH_UNSUPPORTED.to_string()));
    }
    debug!("init accepted");
    Ok(Value::Bool(true))
}

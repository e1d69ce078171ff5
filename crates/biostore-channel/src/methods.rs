//! Method names and argument validation.

use biostore_core::SecretString;
use serde_json::{Map, Value};

use crate::error::ChannelError;
use crate::handlers::InitOptions;
use crate::Result;

/// Capability probe method.
pub const METHOD_CAN_AUTHENTICATE: &str = "canAuthenticate";

/// Initialization method.
pub const METHOD_INIT: &str = "init";

/// Store a secret.
pub const METHOD_WRITE: &str = "write";

/// Retrieve a secret.
pub const METHOD_READ: &str = "read";

/// Remove a secret.
pub const METHOD_DELETE: &str = "delete";

/// A parsed method call.
///
/// Built once per call from the method name and its arguments; every
/// required argument has been validated by the time a value exists.
#[derive(Debug, PartialEq, Eq)]
pub enum Operation {
    /// `canAuthenticate`
    CapabilityProbe,
    /// `init`
    Init(InitOptions),
    /// `write`
    Write {
        /// Caller-supplied short name.
        name: String,
        /// Secret to store.
        content: SecretString,
    },
    /// `read`
    Read {
        /// Caller-supplied short name.
        name: String,
    },
    /// `delete`
    Delete {
        /// Caller-supplied short name.
        name: String,
    },
    /// Any other method name.
    Unknown(String),
}

impl Operation {
    /// Parse a method name and its arguments.
    ///
    /// Fails with [`ChannelError::BadArguments`] when a required argument is
    /// missing or has the wrong type. Unknown methods are not an error here.
    pub fn parse(method: &str, args: Option<&Value>) -> Result<Self> {
        match method {
            METHOD_CAN_AUTHENTICATE => Ok(Self::CapabilityProbe),
            METHOD_INIT => Ok(Self::Init(InitOptions::from_args(args)?)),
            METHOD_WRITE => {
                let map = args_map(method, args)?;
                Ok(Self::Write {
                    name: required_str(method, map, "name")?.to_string(),
                    content: SecretString::new(required_str(method, map, "content")?),
                })
            }
            METHOD_READ => Ok(Self::Read {
                name: required_str(method, args_map(method, args)?, "name")?.to_string(),
            }),
            METHOD_DELETE => Ok(Self::Delete {
                name: required_str(method, args_map(method, args)?, "name")?.to_string(),
            }),
            other => Ok(Self::Unknown(other.to_string())),
        }
    }

    /// The method name this operation was parsed from.
    pub fn method(&self) -> &str {
        match self {
            Self::CapabilityProbe => METHOD_CAN_AUTHENTICATE,
            Self::Init(_) => METHOD_INIT,
            Self::Write { .. } => METHOD_WRITE,
            Self::Read { .. } => METHOD_READ,
            Self::Delete { .. } => METHOD_DELETE,
            Self::Unknown(method) => method,
        }
    }
}

fn args_map<'a>(method: &str, args: Option<&'a Value>) -> Result<&'a Map<String, Value>> {
    args.and_then(Value::as_object).ok_or_else(|| {
        ChannelError::BadArguments(format!("{method}: argument map missing or malformed"))
    })
}

fn required_str<'a>(method: &str, map: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    match map.get(key) {
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(ChannelError::BadArguments(format!(
            "{method}: argument '{key}' must be a string, got {}",
            type_name(other)
        ))),
        None => Err(ChannelError::BadArguments(format!(
            "{method}: missing required argument '{key}'"
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

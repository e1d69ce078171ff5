//! Method channel for biostore.
//!
//! This crate provides:
//! - The method-call wire types and the error taxonomy returned to callers
//! - Dispatch of `canAuthenticate`, `init`, `write`, `read` and `delete`
//! - The completion router that owns each in-flight call until the secret
//!   backend answers, then replies exactly once
//! - A newline-delimited JSON server for hosting the plugin over a byte stream

pub mod call;
pub mod error;
pub mod handlers;
pub mod methods;
pub mod plugin;
pub mod router;
pub mod rpc;
pub mod server;
pub mod translate;

pub use call::CallHandle;
pub use error::ChannelError;
pub use methods::Operation;
pub use plugin::StoragePlugin;
pub use router::CompletionRouter;
pub use rpc::{MethodCall, MethodResponse, Reply};
pub use server::{ChannelServer, ServeStats};
pub use translate::{translate, StructuredError};

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;

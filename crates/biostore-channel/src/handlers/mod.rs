//! Handlers for the synchronous methods.
//!
//! `canAuthenticate` and `init` answer immediately; the storage methods are
//! handed to the [`CompletionRouter`](crate::router::CompletionRouter).

pub mod init;
pub mod probe;

pub use init::{check_init, InitOptions};
pub use probe::{can_authenticate, HW_UNAVAILABLE};

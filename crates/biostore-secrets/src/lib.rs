//! Secret storage backends for biostore.
//!
//! Defines the [`SecretBackend`] trait the method channel talks to, the
//! [`Schema`] and [`CredentialId`] addressing types, and the implementations:
//! `SecretServiceBackend` for the freedesktop secret service on Linux,
//! [`KeyringBackend`] for the platform keychain elsewhere, and
//! [`MemoryBackend`] for tests and ephemeral sessions.

pub mod backend;
pub mod error;
pub mod memory;
pub mod os_keyring;
pub mod types;
#[cfg(target_os = "linux")]
pub mod xdg_secret;

pub use backend::{open_backend, SecretBackend};
pub use error::{BackendError, Result};
pub use memory::MemoryBackend;
pub use os_keyring::KeyringBackend;
pub use types::{CredentialId, NameResolver, Schema};
#[cfg(target_os = "linux")]
pub use xdg_secret::SecretServiceBackend;

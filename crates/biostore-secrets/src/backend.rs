//! The secret backend seam.
//!
//! Defines the [`SecretBackend`] trait: the three asynchronous primitives the
//! method channel issues against the OS secret store.

use std::sync::Arc;

use async_trait::async_trait;
use biostore_core::config::BackendKind;
use biostore_core::SecretString;

use crate::error::Result;
use crate::memory::MemoryBackend;
use crate::types::{CredentialId, Schema};

/// Async trait for secret storage backends.
///
/// Each call completes exactly once, either with a value or with a
/// [`BackendError`](crate::BackendError). Implementations handle their own
/// concurrency; callers never hold a lock across these calls.
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Store `secret` under `id`, replacing any existing value.
    async fn store(&self, schema: &Schema, id: &CredentialId, secret: SecretString) -> Result<()>;

    /// Look up the secret stored under `id`.
    ///
    /// Returns `Ok(None)` when no entry matches; absence is not an error.
    async fn lookup(&self, schema: &Schema, id: &CredentialId) -> Result<Option<SecretString>>;

    /// Remove the entry stored under `id`.
    ///
    /// Returns whether an entry existed.
    async fn clear(&self, schema: &Schema, id: &CredentialId) -> Result<bool>;
}

/// Open the backend selected in configuration.
///
/// `Keyring` selects the secret service on Linux and the platform keychain
/// elsewhere.
pub fn open_backend(kind: BackendKind) -> Arc<dyn SecretBackend> {
    match kind {
        BackendKind::Keyring => os_backend(),
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
    }
}

#[cfg(target_os = "linux")]
fn os_backend() -> Arc<dyn SecretBackend> {
    Arc::new(crate::xdg_secret::SecretServiceBackend::new())
}

#[cfg(not(target_os = "linux"))]
fn os_backend() -> Arc<dyn SecretBackend> {
    Arc::new(crate::os_keyring::KeyringBackend::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_backend_by_kind() {
        let expected = if cfg!(target_os = "linux") {
            "secret-service"
        } else {
            "keyring"
        };
        assert_eq!(open_backend(BackendKind::Keyring).name(), expected);
        assert_eq!(open_backend(BackendKind::Memory).name(), "memory");
    }
}

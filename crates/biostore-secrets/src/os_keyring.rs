//! OS keyring backend.
//!
//! Files each credential as a keyring entry whose service is the schema name
//! and whose user is the credential identifier. Used on macOS and Windows;
//! Linux uses the secret-service backend instead.
//!
//! The `keyring` API is blocking, so every call runs on the blocking pool via
//! [`tokio::task::spawn_blocking`] and the calling task is only resumed once
//! the platform has answered.

use async_trait::async_trait;
use biostore_core::SecretString;
use tracing::debug;

use crate::backend::SecretBackend;
use crate::error::{BackendError, Result, KEYRING_DOMAIN, TASK_DOMAIN};
use crate::types::{CredentialId, Schema};

/// Secret backend backed by the platform keyring.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringBackend;

impl KeyringBackend {
    /// Create a new keyring backend.
    pub fn new() -> Self {
        Self
    }
}

fn entry(schema: &str, id: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(schema, id).map_err(map_keyring_error)
}

/// Translate a keyring failure into a [`BackendError`].
///
/// Codes are stable per variant so callers can branch on them.
pub(crate) fn map_keyring_error(err: keyring::Error) -> BackendError {
    let code = match &err {
        keyring::Error::PlatformFailure(_) => 1,
        keyring::Error::NoStorageAccess(_) => 2,
        keyring::Error::NoEntry => 3,
        keyring::Error::BadEncoding(_) => 4,
        keyring::Error::TooLong(_, _) => 5,
        keyring::Error::Invalid(_, _) => 6,
        keyring::Error::Ambiguous(_) => 7,
        _ => 0,
    };
    BackendError::new(KEYRING_DOMAIN, code, err.to_string())
}

/// Run a blocking keyring call off the async scheduler.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BackendError::new(TASK_DOMAIN, 1, format!("keyring task failed: {e}")))?
}

#[async_trait]
impl SecretBackend for KeyringBackend {
    fn name(&self) -> &'static str {
        "keyring"
    }

    async fn store(&self, schema: &Schema, id: &CredentialId, secret: SecretString) -> Result<()> {
        debug!(credential = %id, "storing secret in keyring");
        let schema = schema.name().to_string();
        let id = id.as_str().to_string();
        run_blocking(move || {
            entry(&schema, &id)?
                .set_password(secret.expose_secret())
                .map_err(map_keyring_error)
        })
        .await
    }

    async fn lookup(&self, schema: &Schema, id: &CredentialId) -> Result<Option<SecretString>> {
        debug!(credential = %id, "looking up secret in keyring");
        let schema = schema.name().to_string();
        let id = id.as_str().to_string();
        run_blocking(move || match entry(&schema, &id)?.get_password() {
            Ok(password) => Ok(Some(SecretString::new(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        })
        .await
    }

    async fn clear(&self, schema: &Schema, id: &CredentialId) -> Result<bool> {
        debug!(credential = %id, "clearing secret from keyring");
        let schema = schema.name().to_string();
        let id = id.as_str().to_string();
        run_blocking(move || match entry(&schema, &id)?.delete_credential() {
            Ok(()) => Ok(true),
            // Nothing stored, nothing removed.
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(map_keyring_error(e)),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_no_entry() {
        let err = map_keyring_error(keyring::Error::NoEntry);
        assert_eq!(err.domain, "keyring");
        assert_eq!(err.code, 3);
    }

    #[test]
    fn test_map_invalid_keeps_native_message() {
        let native = keyring::Error::Invalid("user".to_string(), "empty".to_string());
        let expected = native.to_string();
        let err = map_keyring_error(native);
        assert_eq!(err.code, 6);
        assert_eq!(err.message, expected);
    }

    #[test]
    fn test_map_too_long() {
        let err = map_keyring_error(keyring::Error::TooLong("service".to_string(), 255));
        assert_eq!(err.code, 5);
        assert_eq!(err.domain, KEYRING_DOMAIN);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(KeyringBackend::new().name(), "keyring");
    }
}

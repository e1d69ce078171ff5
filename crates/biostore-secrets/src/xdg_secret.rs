//! Freedesktop secret-service backend (Linux).
//!
//! Items live in the default collection and are addressed by the schema
//! attributes (`xdg:schema` and `name`), labelled with the credential
//! identifier. This is the layout libsecret's password API uses, so items are
//! shared with any libsecret client of the same schema.
//!
//! A new D-Bus session is opened per call; the service itself serializes
//! access to the collection.

use async_trait::async_trait;
use biostore_core::SecretString;
use secret_service::{EncryptionType, SecretService};
use tracing::debug;

use crate::backend::SecretBackend;
use crate::error::{BackendError, Result, SECRET_SERVICE_DOMAIN};
use crate::types::{CredentialId, Schema};

const CONTENT_TYPE: &str = "text/plain";

/// Code reported when a stored secret is not valid UTF-8.
const BAD_ENCODING: i32 = 5;

/// Secret backend speaking the secret-service D-Bus API.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecretServiceBackend;

impl SecretServiceBackend {
    /// Create a new secret-service backend.
    pub fn new() -> Self {
        Self
    }
}

/// Translate a secret-service failure into a [`BackendError`].
pub(crate) fn map_secret_service_error(err: secret_service::Error) -> BackendError {
    let code = match &err {
        secret_service::Error::Unavailable => 1,
        secret_service::Error::Locked => 2,
        secret_service::Error::Prompt => 3,
        secret_service::Error::NoResult => 4,
        _ => 0,
    };
    BackendError::new(SECRET_SERVICE_DOMAIN, code, err.to_string())
}

async fn connect() -> Result<SecretService<'static>> {
    SecretService::connect(EncryptionType::Dh)
        .await
        .map_err(map_secret_service_error)
}

#[async_trait]
impl SecretBackend for SecretServiceBackend {
    fn name(&self) -> &'static str {
        "secret-service"
    }

    async fn store(&self, schema: &Schema, id: &CredentialId, secret: SecretString) -> Result<()> {
        debug!(credential = %id, "storing secret in secret service");
        let service = connect().await?;
        let collection = service
            .get_default_collection()
            .await
            .map_err(map_secret_service_error)?;
        if collection
            .is_locked()
            .await
            .map_err(map_secret_service_error)?
        {
            collection.unlock().await.map_err(map_secret_service_error)?;
        }

        collection
            .create_item(
                id.as_str(),
                schema.attributes(id),
                secret.expose_secret().as_bytes(),
                true,
                CONTENT_TYPE,
            )
            .await
            .map_err(map_secret_service_error)?;
        Ok(())
    }

    async fn lookup(&self, schema: &Schema, id: &CredentialId) -> Result<Option<SecretString>> {
        debug!(credential = %id, "looking up secret in secret service");
        let service = connect().await?;
        let found = service
            .search_items(schema.attributes(id))
            .await
            .map_err(map_secret_service_error)?;

        let item = if let Some(item) = found.unlocked.into_iter().next() {
            item
        } else if let Some(item) = found.locked.into_iter().next() {
            item.unlock().await.map_err(map_secret_service_error)?;
            item
        } else {
            return Ok(None);
        };

        let bytes = item.get_secret().await.map_err(map_secret_service_error)?;
        let secret = String::from_utf8(bytes).map_err(|e| {
            BackendError::new(SECRET_SERVICE_DOMAIN, BAD_ENCODING, e.to_string())
        })?;
        Ok(Some(SecretString::new(secret)))
    }

    async fn clear(&self, schema: &Schema, id: &CredentialId) -> Result<bool> {
        debug!(credential = %id, "clearing secret from secret service");
        let service = connect().await?;
        let found = service
            .search_items(schema.attributes(id))
            .await
            .map_err(map_secret_service_error)?;

        let mut removed = false;
        for item in found.locked {
            item.unlock().await.map_err(map_secret_service_error)?;
            item.delete().await.map_err(map_secret_service_error)?;
            removed = true;
        }
        for item in found.unlocked {
            item.delete().await.map_err(map_secret_service_error)?;
            removed = true;
        }
        Ok(removed)
    }
}

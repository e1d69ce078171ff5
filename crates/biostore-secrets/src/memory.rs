//! In-process secret backend.
//!
//! Keeps secrets in a map keyed by schema name and credential identifier.
//! Nothing is persisted; the contents vanish with the process. Used by tests
//! and by `--backend memory` sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use biostore_core::SecretString;
use parking_lot::Mutex;
use tracing::debug;

use crate::backend::SecretBackend;
use crate::error::{BackendError, Result};
use crate::types::{CredentialId, Schema};

type EntryKey = (String, String);

/// A secret backend held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<EntryKey, SecretString>>,
    failure: Mutex<Option<BackendError>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error` until
    /// [`clear_failure`](Self::clear_failure) is called.
    pub fn fail_with(&self, error: BackendError) {
        *self.failure.lock() = Some(error);
    }

    /// Stop injecting failures.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the backend holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Complete on a later poll, like a real backend answering over IPC.
    async fn begin(&self) -> Result<()> {
        tokio::task::yield_now().await;
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn key(schema: &Schema, id: &CredentialId) -> EntryKey {
    (schema.name().to_string(), id.as_str().to_string())
}

#[async_trait]
impl SecretBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn store(&self, schema: &Schema, id: &CredentialId, secret: SecretString) -> Result<()> {
        self.begin().await?;
        debug!(credential = %id, "storing secret in memory");
        self.entries.lock().insert(key(schema, id), secret);
        Ok(())
    }

    async fn lookup(&self, schema: &Schema, id: &CredentialId) -> Result<Option<SecretString>> {
        self.begin().await?;
        Ok(self.entries.lock().get(&key(schema, id)).cloned())
    }

    async fn clear(&self, schema: &Schema, id: &CredentialId) -> Result<bool> {
        self.begin().await?;
        Ok(self.entries.lock().remove(&key(schema, id)).is_some())
    }
}

//! Asynchronous completion of storage calls.
//!
//! `write`, `read` and `delete` do not answer on the dispatching path. The
//! router moves the [`CallHandle`] into a task together with the backend
//! call, and that task is the only place the call is answered. Each call
//! moves through `issued -> pending -> completed` once; there is no retry,
//! no cancellation and no timeout.
//!
//! Calls are not serialized per credential. Two overlapping writes to the
//! same name race at the backend, and completions come back in whatever
//! order the backend finishes them.

use std::sync::Arc;

use biostore_core::SecretString;
use biostore_secrets::{CredentialId, Schema, SecretBackend};
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

use crate::call::CallHandle;
use crate::rpc::MethodResponse;
use crate::translate::translate;

/// Issues backend calls and routes each completion back to its caller.
#[derive(Clone)]
pub struct CompletionRouter {
    backend: Arc<dyn SecretBackend>,
    schema: Arc<Schema>,
}

impl CompletionRouter {
    /// Create a router over `backend`, filing entries under `schema`.
    pub fn new(backend: Arc<dyn SecretBackend>, schema: Arc<Schema>) -> Self {
        Self { backend, schema }
    }

    /// The schema entries are filed under.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The backend calls are issued against.
    pub fn backend(&self) -> &Arc<dyn SecretBackend> {
        &self.backend
    }

    /// Store `content` under `id`; replies `true` once stored.
    pub fn write(&self, handle: CallHandle, id: CredentialId, content: SecretString) {
        let backend = self.backend.clone();
        let schema = self.schema.clone();
        let span = info_span!("write", call_id = %handle.id(), credential = %id);
        tokio::spawn(
            async move {
                debug!("issued");
                let response = match backend.store(&schema, &id, content).await {
                    Ok(()) => MethodResponse::success(Value::Bool(true)),
                    Err(e) => translate("Failed to store secret", &e).into(),
                };
                debug!("completed");
                handle.respond(response);
            }
            .instrument(span),
        );
    }

    /// Look up `id`; replies with the secret, or `null` when absent.
    pub fn read(&self, handle: CallHandle, id: CredentialId) {
        let backend = self.backend.clone();
        let schema = self.schema.clone();
        let span = info_span!("read", call_id = %handle.id(), credential = %id);
        tokio::spawn(
            async move {
                debug!("issued");
                let response = match backend.lookup(&schema, &id).await {
                    Ok(Some(secret)) => {
                        let value = Value::String(secret.expose_secret().to_string());
                        drop(secret);
                        MethodResponse::success(value)
                    }
                    Ok(None) => {
                        warn!("Failed to lookup secret (not found)");
                        MethodResponse::success(Value::Null)
                    }
                    Err(e) => translate("Failed to lookup secret", &e).into(),
                };
                debug!("completed");
                handle.respond(response);
            }
            .instrument(span),
        );
    }

    /// Remove `id`; replies with whether an entry existed.
    pub fn delete(&self, handle: CallHandle, id: CredentialId) {
        let backend = self.backend.clone();
        let schema = self.schema.clone();
        let span = info_span!("delete", call_id = %handle.id(), credential = %id);
        tokio::spawn(
            async move {
                debug!("issued");
                let response = match backend.clear(&schema, &id).await {
                    Ok(removed) => MethodResponse::success(Value::Bool(removed)),
                    Err(e) => translate("Failed to delete secret", &e).into(),
                };
                debug!("completed");
                handle.respond(response);
            }
            .instrument(span),
        );
    }
}

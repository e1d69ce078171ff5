//! The storage plugin: operation dispatch for one method channel.

use std::sync::Arc;

use biostore_core::Config;
use biostore_secrets::{NameResolver, Schema, SecretBackend};
use serde_json::Value;
use tracing::debug;

use crate::call::CallHandle;
use crate::error::INTERNAL_ERROR;
use crate::handlers::{can_authenticate, check_init};
use crate::methods::Operation;
use crate::router::CompletionRouter;
use crate::rpc::{MethodCall, MethodResponse};

/// Dispatches method calls to the probe, the init guard, or the storage
/// router.
///
/// Built once at startup from immutable configuration; every call borrows
/// the same resolver and router.
#[derive(Clone)]
pub struct StoragePlugin {
    channel: String,
    resolver: NameResolver,
    router: CompletionRouter,
}

impl StoragePlugin {
    /// Create a plugin from its parts.
    pub fn new(
        channel: impl Into<String>,
        resolver: NameResolver,
        schema: Schema,
        backend: Arc<dyn SecretBackend>,
    ) -> Self {
        Self {
            channel: channel.into(),
            resolver,
            router: CompletionRouter::new(backend, Arc::new(schema)),
        }
    }

    /// Create a plugin from configuration and an opened backend.
    pub fn from_config(config: &Config, backend: Arc<dyn SecretBackend>) -> Self {
        Self::new(
            config.channel.name.clone(),
            NameResolver::new(config.storage.name_prefix.clone()),
            Schema::new(config.storage.schema.clone()),
            backend,
        )
    }

    /// The channel name.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// The resolver applied to every credential name.
    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// The router storage calls are handed to.
    pub fn router(&self) -> &CompletionRouter {
        &self.router
    }

    /// Handle one method call.
    ///
    /// Synchronous methods and argument errors are answered before this
    /// returns. Storage methods return immediately and are answered by the
    /// router once the backend completes. Must be called from within a Tokio
    /// runtime.
    pub fn handle_method_call(&self, call: MethodCall, handle: CallHandle) {
        debug!(channel = %self.channel, method = %call.method, call_id = %call.id, "method call");

        let operation = match Operation::parse(&call.method, call.args.as_ref()) {
            Ok(operation) => operation,
            Err(e) => {
                debug!(method = %call.method, "rejected: {}", e);
                handle.respond(e.into());
                return;
            }
        };

        match operation {
            Operation::CapabilityProbe => {
                handle.respond(MethodResponse::success(can_authenticate()));
            }
            Operation::Init(options) => {
                handle.respond(MethodResponse::from_result(check_init(&options)));
            }
            Operation::Write { name, content } => {
                let id = self.resolver.resolve(&name);
                self.router.write(handle, id, content);
            }
            Operation::Read { name } => {
                let id = self.resolver.resolve(&name);
                self.router.read(handle, id);
            }
            Operation::Delete { name } => {
                let id = self.resolver.resolve(&name);
                self.router.delete(handle, id);
            }
            Operation::Unknown(method) => {
                debug!(method = %method, "method not implemented");
                handle.respond(MethodResponse::NotImplemented);
            }
        }
    }

    /// Handle one call and wait for its reply.
    pub async fn call(&self, method: &str, args: Option<Value>) -> MethodResponse {
        let (handle, reply) = CallHandle::oneshot(Value::Null);
        let mut call = MethodCall::new(method);
        call.args = args;
        self.handle_method_call(call, handle);

        reply.await.unwrap_or_else(|_| {
            MethodResponse::error(INTERNAL_ERROR, "call completed without a reply", None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biostore_secrets::MemoryBackend;
    use serde_json::json;

    fn plugin() -> StoragePlugin {
        StoragePlugin::from_config(&Config::default(), Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_can_authenticate() {
        let response = plugin().call("canAuthenticate", None).await;
        assert_eq!(response, MethodResponse::success(json!("ErrorHwUnavailable")));
    }

    #[tokio::test]
    async fn test_init_guard() {
        let plugin = plugin();

        let ok = plugin
            .call("init", Some(json!({"options": {"authenticationRequired": false}})))
            .await;
        assert_eq!(ok, MethodResponse::success(json!(true)));

        let rejected = plugin
            .call("init", Some(json!({"options": {"authenticationRequired": true}})))
            .await;
        assert_eq!(rejected.error_code(), Some("BadArguments"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = plugin().call("list", None).await;
        assert_eq!(response, MethodResponse::NotImplemented);
    }

    #[tokio::test]
    async fn test_bad_arguments_issue_no_backend_call() {
        let backend = Arc::new(MemoryBackend::new());
        let plugin = StoragePlugin::from_config(&Config::default(), backend.clone());

        let response = plugin.call("write", Some(json!({"name": "a"}))).await;
        assert_eq!(response.error_code(), Some("BadArguments"));
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_names_are_namespaced() {
        let backend = Arc::new(MemoryBackend::new());
        let plugin = StoragePlugin::from_config(&Config::default(), backend.clone());

        plugin
            .call("write", Some(json!({"name": "vault1", "content": "x"})))
            .await;

        let schema = plugin.router().schema().clone();
        let id = plugin.resolver().resolve("vault1");
        assert_eq!(id.as_str(), "design.codeux.authpass.vault1");
        let stored = backend.lookup(&schema, &id).await.unwrap().unwrap();
        assert_eq!(stored.expose_secret(), "x");
    }

    #[tokio::test]
    async fn test_storage_call_answers_later() {
        let plugin = plugin();
        let (handle, mut reply) = CallHandle::oneshot(json!(1));

        plugin.handle_method_call(
            MethodCall::new("read").with_args(json!({"name": "vault1"})),
            handle,
        );
        // Nothing is answered on the dispatching path.
        assert!(reply.try_recv().is_err());

        assert_eq!(reply.await.unwrap(), MethodResponse::success(Value::Null));
    }
}

//! Shared fixtures for biostore integration tests.

use std::sync::Arc;

use biostore_channel::StoragePlugin;
use biostore_core::config::Config;
use biostore_secrets::MemoryBackend;

/// A plugin over a fresh in-memory backend, plus a handle to that backend.
pub fn memory_plugin(config: &Config) -> (Arc<StoragePlugin>, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let plugin = Arc::new(StoragePlugin::from_config(config, backend.clone()));
    (plugin, backend)
}

//! Config save/load roundtrip integration tests.

use std::path::Path;

use biostore_core::config::{BackendKind, Config, DEFAULT_NAME_PREFIX};
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("biostore.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.storage.name_prefix, DEFAULT_NAME_PREFIX);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("biostore.json5");

    let mut config = Config::default();
    config.storage.name_prefix = "com.example.vault".into();
    config.storage.backend = BackendKind::Memory;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.storage.name_prefix, "com.example.vault");
    assert_eq!(loaded.storage.backend, BackendKind::Memory);
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/biostore.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    assert!(Config::parse("not valid json").is_err());
}

#[test]
fn test_prefix_from_config_reaches_credential_ids() {
    let config = Config::parse(r#"{ storage: { name_prefix: "com.example" } }"#).unwrap();
    let (plugin, _) = biostore_integration_tests::memory_plugin(&config);
    assert_eq!(plugin.resolver().resolve("token").as_str(), "com.example.token");
}

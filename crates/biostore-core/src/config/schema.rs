//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Namespace prefix applied to every caller-supplied credential name.
pub const DEFAULT_NAME_PREFIX: &str = "design.codeux.authpass";

/// Schema type name under which credentials are filed in the OS secret store.
pub const DEFAULT_SCHEMA_NAME: &str = "design.codeux.BiometricStorage";

/// Method channel name the plugin answers on.
pub const DEFAULT_CHANNEL_NAME: &str = "biometric_storage";

/// Main biostore configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Secret storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Method channel settings.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Secret storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Prefix joined with `.` in front of every credential name.
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,

    /// Schema type name used by the backend.
    #[serde(default = "default_schema_name")]
    pub schema: String,

    /// Which backend holds the secrets.
    #[serde(default)]
    pub backend: BackendKind,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            schema: default_schema_name(),
            backend: BackendKind::default(),
        }
    }
}

fn default_name_prefix() -> String {
    DEFAULT_NAME_PREFIX.to_string()
}

fn default_schema_name() -> String {
    DEFAULT_SCHEMA_NAME.to_string()
}

/// Secret storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// OS keyring (secret-service on Linux).
    #[default]
    Keyring,
    /// Process-local map; contents are lost on exit.
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keyring => f.write_str("keyring"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keyring" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown backend '{other}' (expected keyring or memory)")),
        }
    }
}

/// Method channel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel name reported in logs.
    #[serde(default = "default_channel_name")]
    pub name: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: default_channel_name(),
        }
    }
}

fn default_channel_name() -> String {
    DEFAULT_CHANNEL_NAME.to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "biostore=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.name_prefix, "design.codeux.authpass");
        assert_eq!(config.storage.schema, "design.codeux.BiometricStorage");
        assert_eq!(config.storage.backend, BackendKind::Keyring);
        assert_eq!(config.channel.name, "biometric_storage");
        assert_eq!(config.logging.filter, "biostore=info");
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"storage": {"backend": "memory"}}"#).unwrap();
        assert_eq!(config.storage.backend, BackendKind::Memory);
        assert_eq!(config.storage.name_prefix, DEFAULT_NAME_PREFIX);
        assert_eq!(config.channel.name, DEFAULT_CHANNEL_NAME);
    }

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("keyring".parse::<BackendKind>().unwrap(), BackendKind::Keyring);
        assert_eq!("MEMORY".parse::<BackendKind>().unwrap(), BackendKind::Memory);
        assert!("vault".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Keyring.to_string(), "keyring");
        assert_eq!(BackendKind::Memory.to_string(), "memory");
    }
}

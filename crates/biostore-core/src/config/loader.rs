//! Configuration loading and persistence.

use super::Config;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no config file has been written yet.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        match Self::load(&path) {
            Err(ConfigError::NotFound(_)) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        // 1. Credential name prefix
        if self.storage.name_prefix.is_empty() {
            errors.push("Storage name_prefix cannot be empty".to_string());
        } else if self.storage.name_prefix.ends_with('.') {
            errors.push(format!(
                "Storage name_prefix '{}' must not end with '.'",
                self.storage.name_prefix
            ));
        }

        // 2. Schema name
        if self.storage.schema.trim().is_empty() {
            errors.push("Storage schema cannot be empty".to_string());
        }

        // 3. Channel name
        if self.channel.name.trim().is_empty() {
            errors.push("Channel name cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}

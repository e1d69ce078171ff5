//! # biostore-core
//!
//! Shared functionality for the biostore crates:
//!
//! - **Configuration**: loading, validation, and persistence of the JSON5 config file
//! - **Paths**: resolution of the biostore base directory
//! - **Secrets**: [`SecretString`], a zero-on-drop string for secret payloads

pub mod config;
pub mod error;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretString;

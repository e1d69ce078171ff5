//! biostore command-line interface.

pub mod commands;

use std::sync::Arc;

use anyhow::Context;
use biostore_channel::StoragePlugin;
use biostore_core::config::{BackendKind, Config};
use biostore_core::paths;
use clap::{Parser, Subcommand};

/// biostore - OS secret storage over a method channel
#[derive(Parser)]
#[command(name = "biostore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "BIOSTORE_CONFIG", global = true)]
    pub config: Option<String>,

    /// Secret backend (keyring, memory); overrides the config file
    #[arg(long, env = "BIOSTORE_BACKEND", global = true)]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the method channel on stdin/stdout
    Serve,

    /// Report whether biometric authentication is available
    Probe,

    /// Run the init guard
    Init {
        /// Request authentication-gated storage
        #[arg(long)]
        authentication_required: bool,
    },

    /// Store a secret
    Write {
        /// Credential name
        name: String,

        /// Secret value (if omitted, prompts for hidden input)
        #[arg(long)]
        content: Option<String>,
    },

    /// Print a stored secret
    Read {
        /// Credential name
        name: String,
    },

    /// Delete a stored secret
    Delete {
        /// Credential name
        name: String,
    },

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Load configuration from an explicit path, or from the default location.
///
/// A missing explicit file is an error; a missing default file yields the
/// default configuration.
pub fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            let path = paths::expand_tilde(path);
            Config::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => Config::load_default().context("Failed to load config")?,
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Build the storage plugin for the selected backend.
pub fn build_plugin(config: &Config, backend: Option<BackendKind>) -> Arc<StoragePlugin> {
    let kind = backend.unwrap_or(config.storage.backend);
    tracing::debug!(backend = %kind, "opening secret backend");
    let backend = biostore_secrets::open_backend(kind);
    Arc::new(StoragePlugin::from_config(config, backend))
}

/// Resolve the config path shown by `config path`.
pub fn config_path(path: Option<&str>) -> anyhow::Result<std::path::PathBuf> {
    match path {
        Some(path) => Ok(paths::expand_tilde(path)),
        None => Ok(paths::config_file()?),
    }
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let plugin = || build_plugin(&config, cli.backend);

    match cli.command {
        Commands::Serve => commands::serve::run(plugin()).await,
        Commands::Probe => commands::storage::probe(&plugin()).await,
        Commands::Init {
            authentication_required,
        } => commands::storage::init(&plugin(), authentication_required).await,
        Commands::Write { name, content } => {
            commands::storage::write(&plugin(), &name, content).await
        }
        Commands::Read { name } => commands::storage::read(&plugin(), &name).await,
        Commands::Delete { name } => commands::storage::delete(&plugin(), &name).await,
        Commands::Config(args) => {
            let path = config_path(cli.config.as_deref())?;
            commands::config::run(args, &config, &path)
        }
        Commands::Version => {
            println!("biostore {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

//! Configuration management commands.

use std::path::Path;

use biostore_core::config::Config;
use clap::Args;

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,

    /// Write the effective configuration to the config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the config command.
pub fn run(args: ConfigArgs, config: &Config, path: &Path) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", config.to_json5()?);
        }

        ConfigCommand::Path => {
            let marker = if path.exists() { "" } else { " (not created)" };
            println!("{}{}", path.display(), marker);
        }

        ConfigCommand::Validate => {
            // Loading already validated; report the outcome.
            config.validate()?;
            println!("Configuration is valid.");
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            config.save(path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

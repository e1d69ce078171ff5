//! biostore CLI entry point.

use clap::Parser;
use biostore_cli::{load_config, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging. stdout carries channel replies, so logs go to stderr.
    let default_filter = match cli.verbose {
        0 => config.logging.filter.clone(),
        1 => "biostore=debug".to_string(),
        _ => "biostore=trace".to_string(),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Run the command
    run(cli, config).await
}

//! Serve command.

use std::sync::Arc;

use biostore_channel::{ChannelServer, StoragePlugin};
use tracing::info;

/// Serve the method channel on stdin/stdout until stdin closes.
pub async fn run(plugin: Arc<StoragePlugin>) -> anyhow::Result<()> {
    info!(
        channel = %plugin.channel(),
        backend = plugin.router().backend().name(),
        prefix = %plugin.resolver().prefix(),
        "serving method channel on stdio"
    );

    let server = ChannelServer::new(plugin);
    let stats = server
        .serve(tokio::io::stdin(), tokio::io::stdout())
        .await?;

    info!(
        received = stats.received,
        replied = stats.replied,
        "method channel closed"
    );
    Ok(())
}

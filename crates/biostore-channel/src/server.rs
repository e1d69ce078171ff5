//! Newline-delimited JSON channel server.
//!
//! Reads one [`MethodCall`] per line and writes one [`Reply`] per line. Replies
//! are written as calls complete, so a fast `canAuthenticate` can overtake a
//! slow `read` issued before it; callers correlate by `id`.
//!
//! Lines are framed as raw bytes with no length cap. A line that is not a
//! valid call (bad JSON, bad UTF-8) gets a `BadArguments` reply with a `null`
//! id and the session continues.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{AnyDelimiterCodec, FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

use crate::call::CallHandle;
use crate::error::ChannelError;
use crate::plugin::StoragePlugin;
use crate::rpc::{MethodCall, Reply};
use crate::Result;

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    /// Request lines received (blank lines excluded).
    pub received: usize,

    /// Replies written.
    pub replied: usize,
}

/// Hosts a [`StoragePlugin`] over a byte stream.
pub struct ChannelServer {
    plugin: Arc<StoragePlugin>,
}

impl ChannelServer {
    /// Create a server for `plugin`.
    pub fn new(plugin: Arc<StoragePlugin>) -> Self {
        Self { plugin }
    }

    /// Serve calls from `reader` until end of input.
    ///
    /// After the input closes, waits for every in-flight call to be answered
    /// and flushed before returning.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<ServeStats>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!(channel = %self.plugin.channel(), "channel server started");

        let (reply_tx, reply_rx) = mpsc::unbounded_channel::<Reply>();
        let writer_task = tokio::spawn(write_replies(writer, reply_rx));

        let mut lines = FramedRead::new(reader, AnyDelimiterCodec::new(b"\n".to_vec(), Vec::new()));
        let mut received = 0;
        let mut read_error = None;

        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    read_error = Some(ChannelError::from(e));
                    break;
                }
            };
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            received += 1;

            match serde_json::from_slice::<MethodCall>(&line) {
                Ok(call) => {
                    let handle = CallHandle::new(call.id.clone(), reply_tx.clone());
                    self.plugin.handle_method_call(call, handle);
                }
                Err(e) => {
                    warn!(len = line.len(), "Malformed method call: {}", e);
                    let handle = CallHandle::new(Value::Null, reply_tx.clone());
                    handle.respond(
                        ChannelError::BadArguments(format!("malformed method call: {e}")).into(),
                    );
                }
            }
        }

        // In-flight handles keep the queue open until they have replied.
        drop(reply_tx);
        debug!(received, "input closed, draining replies");

        let replied = writer_task
            .await
            .map_err(|e| ChannelError::Transport(format!("reply writer failed: {e}")))??;

        info!(received, replied, "channel server stopped");
        match read_error {
            Some(e) => Err(e),
            None => Ok(ServeStats { received, replied }),
        }
    }
}

async fn write_replies<W>(writer: W, mut replies: mpsc::UnboundedReceiver<Reply>) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut sink = FramedWrite::new(writer, LinesCodec::new());
    let mut written = 0;

    while let Some(reply) = replies.recv().await {
        let line = serde_json::to_string(&reply)?;
        if let Err(e) = sink.send(line).await {
            error!("Failed to send reply: {}", e);
            return Err(e.into());
        }
        written += 1;
    }

    Ok(written)
}

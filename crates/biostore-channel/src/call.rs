//! Per-call reply handles.

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

use crate::error::INTERNAL_ERROR;
use crate::rpc::{MethodResponse, Reply};

/// Where a handle delivers its reply.
#[derive(Debug)]
enum ReplySink {
    /// Shared outbound queue of a channel server.
    Channel(mpsc::UnboundedSender<Reply>),
    /// A single waiting caller.
    Oneshot(oneshot::Sender<MethodResponse>),
}

/// The means to answer one in-flight method call.
///
/// A handle is created per call and answers it exactly once:
/// [`respond`](Self::respond) consumes the handle, so a second reply cannot
/// be expressed. A handle dropped without responding (for example when the
/// task holding it panics) logs an error and answers with `InternalError`.
#[derive(Debug)]
pub struct CallHandle {
    id: Value,
    sink: Option<ReplySink>,
}

impl CallHandle {
    /// Create a handle that delivers its reply to a channel server's queue.
    pub fn new(id: Value, replies: mpsc::UnboundedSender<Reply>) -> Self {
        Self {
            id,
            sink: Some(ReplySink::Channel(replies)),
        }
    }

    /// Create a handle whose reply is delivered to the returned receiver.
    pub fn oneshot(id: Value) -> (Self, oneshot::Receiver<MethodResponse>) {
        let (tx, rx) = oneshot::channel();
        let handle = Self {
            id,
            sink: Some(ReplySink::Oneshot(tx)),
        };
        (handle, rx)
    }

    /// The ID of the call this handle answers.
    pub fn id(&self) -> &Value {
        &self.id
    }

    /// Send the reply and release the handle.
    pub fn respond(mut self, response: MethodResponse) {
        self.deliver(response);
    }

    fn deliver(&mut self, response: MethodResponse) {
        let id = std::mem::take(&mut self.id);
        let delivered = match self.sink.take() {
            Some(ReplySink::Channel(tx)) => tx.send(Reply { id: id.clone(), response }).is_ok(),
            Some(ReplySink::Oneshot(tx)) => tx.send(response).is_ok(),
            None => false,
        };
        if !delivered {
            warn!(call_id = %id, "caller went away before the reply was delivered");
        }
    }
}

impl Drop for CallHandle {
    fn drop(&mut self) {
        if self.sink.is_some() {
            error!(call_id = %self.id, "call handle dropped without a reply");
            self.deliver(MethodResponse::error(
                INTERNAL_ERROR,
                "call ended without a reply",
                None,
            ));
        }
    }
}

//! Individual realtime connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// A handle to a single live connection.
///
/// Holds the sender side of the connection's outbound queue; a forwarder
/// task owned by the transport layer drains the receiver into the socket.
/// Hubs only ever see this handle, never the socket itself.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Sender for outbound frames.
    sender: mpsc::Sender<String>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle around an outbound queue.
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Queue a frame for delivery to this connection.
    ///
    /// Returns `false` when the frame could not be queued. A closed peer
    /// marks the handle dead; a full buffer drops the frame but keeps the
    /// connection alive.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

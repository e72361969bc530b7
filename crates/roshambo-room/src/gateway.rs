//! The broadcast gateway: how notices leave the core.
//!
//! The coordinator never touches a socket. It hands finished
//! [`ServerEvent`]s to a [`Gateway`], which is responsible for
//! delivering them to the right connections. Delivery is non-blocking
//! and best-effort, because a recipient may be mid-teardown at any
//! moment.
//!
//! The trait is the seam: the server wires in [`ChannelGateway`],
//! tests wire in a recorder.

use std::collections::HashMap;
use std::sync::Mutex;

use roshambo_protocol::{ConnectionId, ServerEvent};
use tokio::sync::mpsc;

/// Channel sender for delivering outbound events to one connection's
/// writer task.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Delivers server events to connections.
pub trait Gateway: Send + Sync + 'static {
    /// Sends an event to a single connection. Silently drops it if
    /// the connection is gone.
    fn send_to(&self, id: ConnectionId, event: ServerEvent);

    /// Sends an event to every listed connection.
    fn broadcast(&self, ids: &[ConnectionId], event: &ServerEvent) {
        for id in ids {
            self.send_to(*id, event.clone());
        }
    }
}

/// A [`Gateway`] backed by one unbounded channel per connection.
///
/// The server registers a connection at accept time and unregisters it
/// on teardown; in between, the connection's writer task drains the
/// receiver into the socket. Events are cloned per recipient.
#[derive(Debug, Default)]
pub struct ChannelGateway {
    /// Registry of live connections. A `std` mutex, not Tokio's: it is
    /// only ever held for a map lookup or insert, never across an
    /// `.await`.
    senders: Mutex<HashMap<ConnectionId, EventSender>>,
}

impl ChannelGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection and returns the receiving half its
    /// writer task should drain.
    pub fn register(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders
            .lock()
            .expect("gateway registry poisoned")
            .insert(id, tx);
        rx
    }

    /// Removes a connection from the registry. Events sent to it from
    /// now on are dropped.
    pub fn unregister(&self, id: ConnectionId) {
        self.senders
            .lock()
            .expect("gateway registry poisoned")
            .remove(&id);
    }
}

impl Gateway for ChannelGateway {
    fn send_to(&self, id: ConnectionId, event: ServerEvent) {
        let senders = self.senders.lock().expect("gateway registry poisoned");
        if let Some(sender) = senders.get(&id) {
            // Receiver gone means the writer task already exited;
            // delivery is best-effort.
            let _ = sender.send(event);
        }
    }
}

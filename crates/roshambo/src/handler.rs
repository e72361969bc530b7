//! Per-connection handler: gateway registration and event routing.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler, plus a writer task that pumps gateway broadcasts into the
//! socket. The flow is:
//!   1. Register with the gateway → outbound channel exists
//!   2. Spawn the writer task draining that channel
//!   3. Loop: receive frames → decode → dispatch to the coordinator
//!   4. On exit (or panic), the drop guard removes the connection from
//!      its room and the gateway, exactly once

use std::sync::Arc;

use roshambo_protocol::{ClientEvent, Codec, ConnectionId};
use roshambo_room::{ChannelGateway, Coordinator};
use roshambo_transport::{Connection, WebSocketConnection};

use crate::ServerError;

/// Drop guard that tears down a connection's server-side state when
/// the handler exits. `Drop` is synchronous, so the async removal is
/// spawned fire-and-forget.
struct ConnectionGuard {
    id: ConnectionId,
    coordinator: Arc<Coordinator<ChannelGateway>>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let id = self.id;
        let coordinator = Arc::clone(&self.coordinator);
        tokio::spawn(async move {
            // Unregister first: closing the outbound channel also lets
            // the writer task wind down.
            coordinator.gateway().unregister(id);
            coordinator.handle_disconnect(id).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec + Clone>(
    conn: WebSocketConnection,
    coordinator: Arc<Coordinator<ChannelGateway>>,
    codec: C,
) -> Result<(), ServerError> {
    let id = conn.id();
    tracing::debug!(%id, "handling new connection");

    // --- Writer task: gateway channel → socket ---
    let mut outbound = coordinator.gateway().register(id);
    let writer_conn = conn.clone();
    let writer_codec = codec.clone();
    tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            let text = match writer_codec.encode(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode event");
                    continue;
                }
            };
            if writer_conn.send(&text).await.is_err() {
                // Peer is gone; the reader loop will observe the close.
                break;
            }
        }
    });

    let _guard = ConnectionGuard {
        id,
        coordinator: Arc::clone(&coordinator),
    };

    // --- Reader loop: one client event per frame ---
    loop {
        let text = match conn.recv().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::info!(%id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%id, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match codec.decode(&text) {
            Ok(event) => event,
            Err(e) => {
                // Malformed frames (bad JSON, unknown type tag, a
                // choice outside the closed set) are skipped, not
                // faulted. Expected under hostile or buggy clients.
                tracing::debug!(%id, error = %e, "undecodable frame, skipping");
                continue;
            }
        };

        match event {
            ClientEvent::JoinRoom { room, player_name } => {
                coordinator.handle_join(id, room, &player_name).await;
            }
            ClientEvent::SubmitChoice { room, choice } => {
                coordinator.handle_choice(id, &room, choice).await;
            }
        }
    }

    // _guard drops here → room removal and gateway unregistration fire.
    Ok(())
}

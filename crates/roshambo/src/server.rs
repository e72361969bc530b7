//! `Server` builder and accept loop.
//!
//! This ties the layers together: transport → protocol → room core.
//! The builder assembles an owned [`RoomStore`] and [`ChannelGateway`]
//! per server instance (no ambient global registry), so independent
//! servers (one per test, say) never share state.

use std::sync::Arc;

use roshambo_protocol::{Codec, JsonCodec};
use roshambo_room::{ChannelGateway, Coordinator, RoomStore};
use roshambo_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::ServerError;

/// Builder for configuring and starting a Roshambo server.
pub struct ServerBuilder {
    bind_addr: String,
}

impl ServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".to_string(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Builds the server: binds the transport and assembles a fresh
    /// coordinator. Uses [`JsonCodec`] and [`WebSocketTransport`].
    pub async fn build(self) -> Result<Server<JsonCodec>, ServerError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let coordinator = Arc::new(Coordinator::new(
            RoomStore::new(),
            ChannelGateway::new(),
        ));
        Ok(Server {
            transport,
            coordinator,
            codec: JsonCodec,
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Roshambo server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct Server<C: Codec + Clone> {
    transport: WebSocketTransport,
    coordinator: Arc<Coordinator<ChannelGateway>>,
    codec: C,
}

impl<C: Codec + Clone> Server<C> {
    /// Creates a new builder.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), ServerError> {
        tracing::info!("roshambo server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let coordinator = Arc::clone(&self.coordinator);
                    let codec = self.codec.clone();
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(conn, coordinator, codec).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}

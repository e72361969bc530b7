//! # Roshambo
//!
//! A two-player rock-paper-scissors session server over WebSockets.
//!
//! Clients join a shared room by code, submit one choice per round,
//! and receive the revealed pair once both are in. The server is the
//! coordinator only: it pairs players, relays choices, and reports
//! disconnects. Scorekeeping and outcome display are client concerns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roshambo::ServerBuilder;
//!
//! # async fn run() -> Result<(), roshambo::ServerError> {
//! let server = ServerBuilder::new().bind("0.0.0.0:3001").build().await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::ServerError;
pub use server::{Server, ServerBuilder};

// Re-export the event surface so embedders and tests don't need to
// depend on the sub-crates directly.
pub use roshambo_protocol::{
    Choice, ClientEvent, Codec, ConnectionId, JsonCodec, PlayerChoice,
    PlayerPublic, RoomCode, ServerEvent,
};
pub use roshambo_room::{resolve, RoundResult};

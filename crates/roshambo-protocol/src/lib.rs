//! Wire protocol for Roshambo.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`Choice`], the
//!   identity newtypes): the structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those events are
//!   converted to/from text frames.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw frames) and the room
//! core (session state). It doesn't know about connections or rooms;
//! it only knows how to serialize and deserialize events.
//!
//! ```text
//! Transport (frames) → Protocol (events) → Coordinator (room state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Choice, ClientEvent, ConnectionId, PlayerChoice, PlayerPublic,
    RoomCode, ServerEvent,
};

//! Room lifecycle and session coordination for Roshambo.
//!
//! This is the server's core: everything with real state-machine
//! behavior lives here, behind a transport-agnostic surface.
//!
//! # Key types
//!
//! - [`RoomStore`]: in-memory registry of rooms and their members
//! - [`Coordinator`]: translates connection events into store
//!   mutations and outbound notices
//! - [`Gateway`]: the seam through which notices leave the core
//! - [`resolve`]: the pure rock/paper/scissors outcome function
//!
//! A room holds at most two players and a monotonically increasing
//! round counter. Rooms are created on first join, dissolved when
//! their last member disconnects, and never persisted.

mod coordinator;
mod gateway;
mod outcome;
mod store;

pub use coordinator::Coordinator;
pub use gateway::{ChannelGateway, EventSender, Gateway};
pub use outcome::{resolve, RoundResult};
pub use store::{JoinOutcome, RemovalOutcome, RoomStore, SubmitOutcome};

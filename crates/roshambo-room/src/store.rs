//! The room store: tracks every active room and its members.
//!
//! This is the only shared mutable state in the server. It is
//! responsible for:
//! - Creating rooms on first join and enforcing the two-player cap
//! - Tracking each member's per-round choice
//! - Deciding when a round is complete and resetting it atomically
//! - Removing disconnected members and dissolving empty rooms
//!
//! # Concurrency note
//!
//! `RoomStore` is NOT thread-safe by itself; it uses a plain
//! `HashMap`, not a concurrent one. This is intentional: the store is
//! owned by the [`Coordinator`](crate::Coordinator) and accessed
//! through a mutex at that level, which is what guarantees that two
//! submissions racing to be "the second choice" are serialized and
//! exactly one of them observes [`SubmitOutcome::RoundComplete`].

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use roshambo_protocol::{Choice, ConnectionId, PlayerChoice, RoomCode};

/// Hard cap on room membership. A capacity invariant of the protocol,
/// not a tunable.
const MAX_PLAYERS: usize = 2;

/// One connected participant in a room.
#[derive(Debug)]
struct Player {
    id: ConnectionId,
    name: String,
    /// `None` between rounds and until this player submits.
    choice: Option<Choice>,
}

/// One session container. Exists only while it has at least one member.
#[derive(Debug)]
struct Room {
    /// At most [`MAX_PLAYERS`] entries, in join order.
    players: Vec<Player>,
    /// Starts at 1, incremented after every completed round.
    round: u64,
}

// ---------------------------------------------------------------------------
// Operation outcomes
// ---------------------------------------------------------------------------

/// Result of [`RoomStore::join_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The room didn't exist; it was created with the caller as its
    /// sole member.
    CreatedWaiting,
    /// The caller became the second member; the room is ready to play.
    Ready,
    /// The room already had two members. No mutation.
    RejectedFull,
    /// The caller is already a member of some room. No mutation.
    /// (Duplicate joins are not part of the protocol; treating them as
    /// a no-op keeps connection ids unique across all rooms.)
    AlreadyJoined,
}

/// Result of [`RoomStore::submit_choice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The choice was recorded; at least one other member hasn't
    /// submitted yet.
    AwaitingOpponent,
    /// Every current member had submitted. Carries the snapshot taken
    /// before choices were reset and the round counter advanced.
    RoundComplete(Vec<PlayerChoice>),
    /// No such room: stale input, e.g. it dissolved while the frame
    /// was in flight.
    UnknownRoom,
    /// The sender is not a member of that room.
    UnknownPlayer,
}

/// Result of [`RoomStore::remove_connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The member was the room's last; the room was dissolved.
    RoomDeleted(RoomCode),
    /// The member was removed and at least one member remains in the
    /// named room.
    OpponentLeft(RoomCode),
    /// The connection wasn't in any room (benign duplicate disconnect).
    NotFound,
}

// ---------------------------------------------------------------------------
// RoomStore
// ---------------------------------------------------------------------------

/// In-memory registry of rooms, keyed by room code.
///
/// An owned instance, constructed where the server is assembled and
/// injected into the coordinator, so multiple independent stores can
/// coexist in one process (one per test, for instance).
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: HashMap<RoomCode, Room>,
}

impl RoomStore {
    /// Creates a new, empty room store.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Joins `id` to the room named `code`, creating the room if needed.
    ///
    /// A connection can be in at most one room at a time; a join from
    /// a connection that is already a member of any room (this one or
    /// another) returns [`JoinOutcome::AlreadyJoined`] without
    /// mutating anything.
    pub fn join_or_create(
        &mut self,
        code: RoomCode,
        id: ConnectionId,
        name: String,
    ) -> JoinOutcome {
        if self.member_room(id).is_some() {
            return JoinOutcome::AlreadyJoined;
        }

        match self.rooms.entry(code) {
            Entry::Vacant(entry) => {
                tracing::info!(room = %entry.key(), %id, "room created");
                entry.insert(Room {
                    players: vec![Player {
                        id,
                        name,
                        choice: None,
                    }],
                    round: 1,
                });
                JoinOutcome::CreatedWaiting
            }
            Entry::Occupied(mut entry) => {
                let room = entry.get_mut();
                if room.players.len() >= MAX_PLAYERS {
                    return JoinOutcome::RejectedFull;
                }
                room.players.push(Player {
                    id,
                    name,
                    choice: None,
                });
                let players = room.players.len();
                tracing::info!(room = %entry.key(), %id, players, "player joined");
                JoinOutcome::Ready
            }
        }
    }

    /// Records `id`'s choice for the current round of `code`.
    ///
    /// Re-submitting overwrites the previous choice. When every
    /// *current* member has a choice, the round completes: all
    /// `(id, name, choice)` triples are snapshotted in join order,
    /// then every choice is reset and the round counter advances, all
    /// in one step, so no observer ever sees a half-reset round.
    ///
    /// Completion is defined over current membership on purpose: a
    /// room that has lost a player still completes a round off the
    /// remaining member's submission rather than deadlocking.
    pub fn submit_choice(
        &mut self,
        code: &RoomCode,
        id: ConnectionId,
        choice: Choice,
    ) -> SubmitOutcome {
        let Some(room) = self.rooms.get_mut(code) else {
            return SubmitOutcome::UnknownRoom;
        };
        let Some(player) = room.players.iter_mut().find(|p| p.id == id) else {
            return SubmitOutcome::UnknownPlayer;
        };

        player.choice = Some(choice);

        if room.players.iter().any(|p| p.choice.is_none()) {
            return SubmitOutcome::AwaitingOpponent;
        }

        // `take()` both captures and resets each choice.
        let choices: Vec<PlayerChoice> = room
            .players
            .iter_mut()
            .filter_map(|p| {
                let choice = p.choice.take()?;
                Some(PlayerChoice {
                    id: p.id,
                    name: p.name.clone(),
                    choice,
                })
            })
            .collect();
        room.round += 1;
        tracing::debug!(room = %code, round = room.round, "round complete");
        SubmitOutcome::RoundComplete(choices)
    }

    /// Removes the connection from whichever room holds it.
    ///
    /// Connection ids are unique across all rooms, so at most one
    /// member is removed. Idempotent: a second call for the same
    /// connection returns [`RemovalOutcome::NotFound`].
    pub fn remove_connection(&mut self, id: ConnectionId) -> RemovalOutcome {
        let Some(code) = self.member_room(id) else {
            return RemovalOutcome::NotFound;
        };

        // member_room just found this entry.
        let Some(room) = self.rooms.get_mut(&code) else {
            return RemovalOutcome::NotFound;
        };
        room.players.retain(|p| p.id != id);
        let remaining = room.players.len();

        if remaining == 0 {
            self.rooms.remove(&code);
            tracing::info!(room = %code, %id, "last player left, room dissolved");
            RemovalOutcome::RoomDeleted(code)
        } else {
            tracing::info!(room = %code, %id, remaining, "player left");
            RemovalOutcome::OpponentLeft(code)
        }
    }

    /// Lists a room's members as `(id, name)` pairs, in join order.
    ///
    /// Read-only and infallible: an absent room yields an empty list.
    pub fn snapshot_members(&self, code: &RoomCode) -> Vec<(ConnectionId, String)> {
        self.rooms
            .get(code)
            .map(|room| {
                room.players
                    .iter()
                    .map(|p| (p.id, p.name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns a room's current round number, if the room exists.
    pub fn round(&self, code: &RoomCode) -> Option<u64> {
        self.rooms.get(code).map(|room| room.round)
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Finds the room (if any) that `id` is currently a member of.
    fn member_room(&self, id: ConnectionId) -> Option<RoomCode> {
        self.rooms
            .iter()
            .find(|(_, room)| room.players.iter().any(|p| p.id == id))
            .map(|(code, _)| code.clone())
    }
}

// =========================================================================
// Tests
// =========================================================================

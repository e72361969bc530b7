//! The session coordinator: binds connection events to store
//! mutations and decides what to broadcast.
//!
//! Per room, the coordinator walks a simple machine:
//!
//! ```text
//! (absent) ──join──→ WAITING (1 player) ──join──→ ACTIVE (2 players)
//!                                                    │  ▲
//!                                            round complete (loops)
//!                                                    ▼  │
//!                                                   ACTIVE ──last leave──→ (absent)
//! ```
//!
//! There is no terminal "game over" state: best-of-N scoring is a
//! client concern layered on repeated `round-complete` events.
//!
//! Every entry point is fire-and-forget against malformed or late
//! input: unknown rooms, duplicate disconnects, and submissions that
//! arrive after a room dissolved are benign no-ops, never faults.

use roshambo_protocol::{Choice, ConnectionId, PlayerPublic, RoomCode, ServerEvent};
use tokio::sync::Mutex;

use crate::store::{JoinOutcome, RemovalOutcome, RoomStore, SubmitOutcome};
use crate::Gateway;

/// Translates connection-scoped events into [`RoomStore`] mutations
/// and outbound notices through a [`Gateway`].
///
/// Owns the store behind a single mutex: every mutation is serialized,
/// which is what makes "exactly one submission observes round
/// completion" hold even with one Tokio task per connection. Outcomes
/// and recipient lists are computed under the lock; delivery happens
/// after it is released.
pub struct Coordinator<Gw: Gateway> {
    store: Mutex<RoomStore>,
    gateway: Gw,
}

impl<Gw: Gateway> Coordinator<Gw> {
    /// Creates a coordinator over an owned store and gateway.
    pub fn new(store: RoomStore, gateway: Gw) -> Self {
        Self {
            store: Mutex::new(store),
            gateway,
        }
    }

    /// Returns the gateway, for connection registration at the
    /// transport boundary.
    pub fn gateway(&self) -> &Gw {
        &self.gateway
    }

    /// Handles a `join-room` request.
    ///
    /// Blank names (empty after trimming) are dropped without a reply;
    /// name validation proper is a client concern, this is just the
    /// boundary defense.
    pub async fn handle_join(&self, id: ConnectionId, room: RoomCode, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!(%id, room = %room, "join with blank name, ignoring");
            return;
        }

        let (outcome, members) = {
            let mut store = self.store.lock().await;
            let outcome = store.join_or_create(room.clone(), id, name.to_string());
            let members = match outcome {
                JoinOutcome::Ready => store.snapshot_members(&room),
                _ => Vec::new(),
            };
            (outcome, members)
        };

        match outcome {
            JoinOutcome::CreatedWaiting => {
                self.gateway.send_to(id, ServerEvent::Waiting);
            }
            JoinOutcome::Ready => {
                let ids: Vec<ConnectionId> =
                    members.iter().map(|(id, _)| *id).collect();
                let players = members
                    .into_iter()
                    .map(|(id, name)| PlayerPublic { id, name })
                    .collect();
                self.gateway.broadcast(&ids, &ServerEvent::Start { players });
            }
            JoinOutcome::RejectedFull => {
                self.gateway.send_to(id, ServerEvent::RoomFull);
            }
            JoinOutcome::AlreadyJoined => {
                tracing::debug!(%id, room = %room, "duplicate join, ignoring");
            }
        }
    }

    /// Handles a `submit-choice` request.
    pub async fn handle_choice(&self, id: ConnectionId, room: &RoomCode, choice: Choice) {
        let outcome = self.store.lock().await.submit_choice(room, id, choice);

        match outcome {
            SubmitOutcome::RoundComplete(choices) => {
                let ids: Vec<ConnectionId> = choices.iter().map(|c| c.id).collect();
                self.gateway
                    .broadcast(&ids, &ServerEvent::RoundComplete { choices });
            }
            // The sole submitter gets no echo; their client already
            // knows what it played.
            SubmitOutcome::AwaitingOpponent => {}
            SubmitOutcome::UnknownRoom | SubmitOutcome::UnknownPlayer => {
                tracing::debug!(%id, room = %room, "stale choice submission, ignoring");
            }
        }
    }

    /// Handles a transport-level disconnect.
    ///
    /// Safe to call more than once per connection; only the first call
    /// finds anything to remove.
    pub async fn handle_disconnect(&self, id: ConnectionId) {
        let (outcome, members) = {
            let mut store = self.store.lock().await;
            let outcome = store.remove_connection(id);
            let members = match &outcome {
                RemovalOutcome::OpponentLeft(code) => store.snapshot_members(code),
                _ => Vec::new(),
            };
            (outcome, members)
        };

        if let RemovalOutcome::OpponentLeft(_) = outcome {
            let ids: Vec<ConnectionId> = members.iter().map(|(id, _)| *id).collect();
            self.gateway.broadcast(&ids, &ServerEvent::OpponentLeft);
        }
    }
}

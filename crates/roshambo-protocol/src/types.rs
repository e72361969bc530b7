//! Core protocol types for Roshambo's wire format.
//!
//! Every type here either travels on the wire verbatim or is embedded
//! in something that does. The event shapes are deliberately
//! byte-compatible with the original browser client's socket.io
//! protocol: kebab-case `type` tags, camelCase payload fields, and
//! lowercase choice names.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for one live connection.
///
/// This is a newtype wrapper around `u64`. Connection identity doubles
/// as player identity for the life of that connection: there is no
/// separate account or session concept, and the id is NOT stable across
/// reconnects. A client that drops and reconnects is a brand-new player.
///
/// `#[serde(transparent)]` serializes this as the bare number, so the
/// `id` fields in [`PlayerPublic`] and [`PlayerChoice`] come out as
/// `42`, not `{ "0": 42 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// An opaque room key, chosen by the client that creates the room.
///
/// Same newtype pattern as [`ConnectionId`], but string-valued: players
/// share a short code out of band ("join ABCD") and both type it in.
/// The server never generates or interprets these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

// ---------------------------------------------------------------------------
// Choice
// ---------------------------------------------------------------------------

/// One of the three per-round choices.
///
/// A closed enum rather than a string: a frame carrying anything other
/// than `"rock"`, `"paper"`, or `"scissors"` fails to deserialize and
/// never reaches the room core. `rename_all = "lowercase"` matches the
/// wire spelling the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rock => write!(f, "rock"),
            Self::Paper => write!(f, "paper"),
            Self::Scissors => write!(f, "scissors"),
        }
    }
}

// ---------------------------------------------------------------------------
// Broadcast payload entries
// ---------------------------------------------------------------------------

/// A member's public identity, as listed in the `start` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    /// The member's connection id.
    pub id: ConnectionId,
    /// The member's display name.
    pub name: String,
}

/// One member's revealed choice, as listed in the `round-complete` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerChoice {
    /// The member's connection id.
    pub id: ConnectionId,
    /// The member's display name.
    pub name: String,
    /// What they played this round.
    pub choice: Choice,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Everything a client can send.
///
/// `#[serde(tag = "type", rename_all = "kebab-case")]` produces
/// internally tagged JSON with kebab-case event names:
///
/// ```json
/// { "type": "join-room", "room": "ABCD", "playerName": "Alice" }
/// { "type": "submit-choice", "room": "ABCD", "choice": "rock" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Create the room if absent, otherwise join it.
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room: RoomCode,
        player_name: String,
    },

    /// Submit this round's choice.
    SubmitChoice { room: RoomCode, choice: Choice },
}

/// Everything the server can send.
///
/// Same tagging scheme as [`ClientEvent`]. Unit variants serialize as
/// a bare tag object, e.g. `{ "type": "waiting" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent to a room's sole member: you're in, now wait for an opponent.
    Waiting,

    /// Sent to every member when the room reaches two players.
    /// `players` is in join order.
    Start { players: Vec<PlayerPublic> },

    /// Sent to a requester whose join was rejected at capacity.
    RoomFull,

    /// Sent to every member when all current members have submitted.
    /// `choices` is in join order; clients resolve the winner locally.
    RoundComplete { choices: Vec<PlayerChoice> },

    /// Sent to every remaining member when someone disconnects.
    OpponentLeft,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Tests for protocol types and their JSON serialization.
    //!
    //! The event shapes must match what the browser client emits and
    //! expects, because a mismatch means the client silently ignores
    //! our broadcasts. These tests pin the exact tags and field casing.

    use super::*;

    // =====================================================================
    // Identity types: ConnectionId, RoomCode
    // =====================================================================

    #[test]
    fn test_connection_id_serializes_as_plain_number() {
        // `#[serde(transparent)]` means ConnectionId(42) → `42`.
        let json = serde_json::to_string(&ConnectionId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_connection_id_deserializes_from_plain_number() {
        let id: ConnectionId = serde_json::from_str("42").unwrap();
        assert_eq!(id, ConnectionId(42));
    }

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId(7).to_string(), "conn-7");
    }

    #[test]
    fn test_room_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomCode::from("ABCD")).unwrap();
        assert_eq!(json, "\"ABCD\"");
    }

    #[test]
    fn test_room_code_display() {
        assert_eq!(RoomCode::from("ABCD").to_string(), "ABCD");
    }

    // =====================================================================
    // Choice
    // =====================================================================

    #[test]
    fn test_choice_serializes_lowercase() {
        // The client sends and matches on lowercase names.
        assert_eq!(serde_json::to_string(&Choice::Rock).unwrap(), "\"rock\"");
        assert_eq!(serde_json::to_string(&Choice::Paper).unwrap(), "\"paper\"");
        assert_eq!(
            serde_json::to_string(&Choice::Scissors).unwrap(),
            "\"scissors\""
        );
    }

    #[test]
    fn test_choice_rejects_unknown_value() {
        // Anything outside the closed 3-value set fails to decode.
        let result: Result<Choice, _> = serde_json::from_str("\"lizard\"");
        assert!(result.is_err());
    }

    // =====================================================================
    // ClientEvent: one test per variant to verify JSON shape
    // =====================================================================

    #[test]
    fn test_client_event_join_room_json_format() {
        // Kebab-case tag, camelCase field: exactly what the browser
        // client emits.
        let event = ClientEvent::JoinRoom {
            room: RoomCode::from("ABCD"),
            player_name: "Alice".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "join-room");
        assert_eq!(json["room"], "ABCD");
        assert_eq!(json["playerName"], "Alice");
    }

    #[test]
    fn test_client_event_submit_choice_json_format() {
        let event = ClientEvent::SubmitChoice {
            room: RoomCode::from("ABCD"),
            choice: Choice::Scissors,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "submit-choice");
        assert_eq!(json["room"], "ABCD");
        assert_eq!(json["choice"], "scissors");
    }

    #[test]
    fn test_client_event_join_room_round_trip() {
        let event = ClientEvent::JoinRoom {
            room: RoomCode::from("XYZ"),
            player_name: "Bob".into(),
        };
        let text = serde_json::to_string(&event).unwrap();
        let decoded: ClientEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(event, decoded);
    }

    // =====================================================================
    // ServerEvent
    // =====================================================================

    #[test]
    fn test_server_event_waiting_is_bare_tag() {
        // Unit variants serialize as just the tag object.
        let json: serde_json::Value =
            serde_json::to_value(&ServerEvent::Waiting).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "waiting" }));
    }

    #[test]
    fn test_server_event_room_full_is_bare_tag() {
        let json: serde_json::Value =
            serde_json::to_value(&ServerEvent::RoomFull).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "room-full" }));
    }

    #[test]
    fn test_server_event_opponent_left_is_bare_tag() {
        let json: serde_json::Value =
            serde_json::to_value(&ServerEvent::OpponentLeft).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "opponent-left" }));
    }

    #[test]
    fn test_server_event_start_json_format() {
        let event = ServerEvent::Start {
            players: vec![
                PlayerPublic {
                    id: ConnectionId(1),
                    name: "Alice".into(),
                },
                PlayerPublic {
                    id: ConnectionId(2),
                    name: "Bob".into(),
                },
            ],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "start");
        assert_eq!(json["players"][0]["id"], 1);
        assert_eq!(json["players"][0]["name"], "Alice");
        assert_eq!(json["players"][1]["id"], 2);
        assert_eq!(json["players"][1]["name"], "Bob");
    }

    #[test]
    fn test_server_event_round_complete_json_format() {
        let event = ServerEvent::RoundComplete {
            choices: vec![
                PlayerChoice {
                    id: ConnectionId(1),
                    name: "Alice".into(),
                    choice: Choice::Rock,
                },
                PlayerChoice {
                    id: ConnectionId(2),
                    name: "Bob".into(),
                    choice: Choice::Scissors,
                },
            ],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "round-complete");
        assert_eq!(json["choices"][0]["choice"], "rock");
        assert_eq!(json["choices"][1]["choice"], "scissors");
        assert_eq!(json["choices"][1]["name"], "Bob");
    }

    #[test]
    fn test_server_event_round_trip() {
        let event = ServerEvent::Start {
            players: vec![PlayerPublic {
                id: ConnectionId(9),
                name: "solo".into(),
            }],
        };
        let text = serde_json::to_string(&event).unwrap();
        let decoded: ServerEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(event, decoded);
    }

    // =====================================================================
    // Error cases: malformed input
    // =====================================================================

    #[test]
    fn test_decode_garbage_returns_error() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_unknown_event_type_returns_error() {
        let unknown = r#"{"type": "launch-missiles", "room": "ABCD"}"#;
        let result: Result<ClientEvent, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_missing_field_returns_error() {
        // join-room without a playerName is malformed.
        let wrong = r#"{"type": "join-room", "room": "ABCD"}"#;
        let result: Result<ClientEvent, _> = serde_json::from_str(wrong);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_invalid_choice_returns_error() {
        // A submit-choice with a value outside the closed set never
        // reaches the room core.
        let wrong = r#"{"type": "submit-choice", "room": "A", "choice": "dynamite"}"#;
        let result: Result<ClientEvent, _> = serde_json::from_str(wrong);
        assert!(result.is_err());
    }
}

//! Codec trait and implementations for serializing/deserializing events.
//!
//! A codec converts between Rust types and the text of a wire frame.
//! The protocol layer doesn't care HOW events are serialized. It just
//! needs something that implements the [`Codec`] trait, so a different
//! encoding can be swapped in without touching the server or the room
//! core.
//!
//! Frames are text rather than binary because that is what the original
//! browser client speaks: one JSON object per WebSocket text frame.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes Rust values into text frames and decodes them back.
///
/// `Send + Sync + 'static` because the codec is shared across the
/// per-connection Tokio tasks for the life of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into one frame's worth of text.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a frame back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the text is malformed,
    /// has an unknown `type` tag, or doesn't match the expected shape.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use roshambo_protocol::{Codec, JsonCodec, ServerEvent};
///
/// let codec = JsonCodec;
/// let text = codec.encode(&ServerEvent::Waiting).unwrap();
/// assert_eq!(text, r#"{"type":"waiting"}"#);
///
/// let decoded: ServerEvent = codec.decode(&text).unwrap();
/// assert_eq!(decoded, ServerEvent::Waiting);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}

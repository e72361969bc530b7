//! Unified error type for the server crate.

use roshambo_protocol::ProtocolError;
use roshambo_transport::TransportError;

/// Top-level error that wraps the infrastructure errors.
///
/// Only the transport and protocol layers can fail; the room core
/// reports everything as an outcome and has no error type at all.
/// The `#[from]` attributes let `?` convert sub-crate errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::BindFailed(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "taken",
        ));
        let server_err: ServerError = err.into();
        assert!(matches!(server_err, ServerError::Transport(_)));
        assert!(server_err.to_string().contains("taken"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = serde_json::from_str::<roshambo_protocol::ClientEvent>("nope")
            .map_err(ProtocolError::Decode)
            .unwrap_err();
        let server_err: ServerError = err.into();
        assert!(matches!(server_err, ServerError::Protocol(_)));
    }
}

//! Error types for the mod notes client.

use modnotes_rs_protocol::{ProtocolError, TransportError};
use thiserror::Error;

/// Errors returned by note queries and mutations.
#[derive(Debug, Error)]
pub enum ModNotesError {
    /// A required subreddit or redditor could not be determined.
    #[error("configuration error: {0}")]
    Config(String),
    /// The query input has a shape notes cannot be fetched for.
    #[error("cannot get notes for {kind}")]
    UnsupportedItem { kind: String },
    /// The supplied argument combination is invalid.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// The request failed in transport.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with an unexpected payload shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A payload of a known shape failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ProtocolError> for ModNotesError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Decode(err) => ModNotesError::Decode(err),
            ProtocolError::Unrecognized(message) => ModNotesError::InvalidResponse(message),
        }
    }
}

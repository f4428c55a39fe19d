//! Error types shared across the Portico stack
//!
//! Each layer defines its own error enum in its own crate; this module
//! holds only the errors tied to the core types and the transport seam.

use thiserror::Error;

/// Errors related to peer and instance identifiers
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}

/// Errors surfaced by a [`HostTransport`](crate::transport::HostTransport)
///
/// `Offline` covers connection-refused and unreachable-peer conditions.
/// Timeouts are not produced here; callers bound transport operations
/// with their own deadline and classify elapsed time themselves, so that
/// per-candidate timeouts stay independent.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Peer is offline or unreachable: {0}")]
    Offline(String),

    #[error("Remote execution failed: {0}")]
    Remote(String),
}

impl TransportError {
    /// Whether this failure indicates the peer could not be reached at
    /// all, as opposed to the peer rejecting or failing the call.
    pub fn is_liveness_failure(&self) -> bool {
        !matches!(self, Self::Remote(_))
    }
}

/// Errors related to payload encoding at the transport seam
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Payload encoding failed: {0}")]
    Encode(String),

    #[error("Payload decoding failed: {0}")]
    Decode(String),
}

impl From<postcard::Error> for CodecError {
    fn from(e: postcard::Error) -> Self {
        CodecError::Decode(e.to_string())
    }
}

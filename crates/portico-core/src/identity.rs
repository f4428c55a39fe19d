//! Peer and network-instance identifiers
//!
//! Both identifiers are opaque 32-byte values. Peers are issued an
//! identity once and never change it; instance identifiers address the
//! shared application context under which peers and content live.

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Opaque, globally unique identifier of a network participant.
///
/// Immutable once issued. The inner bytes typically come from a public
/// key, but this crate treats them as opaque.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeerId(pub [u8; 32]);

impl PeerId {
    /// Create a peer identity from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a peer identity from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| IdentityError::InvalidKeyLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Generate a random peer identity (for tests and simulations).
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Get the identity as bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short display form for logging (first 8 hex chars).
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", self.short_id())
    }
}

/// Identifier of a shared network instance.
///
/// All host registrations and content addresses are scoped to an
/// instance. Human-readable aliases for instances are maintained by the
/// host directory, not here.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub [u8; 32]);

impl InstanceId {
    /// Create an instance identifier from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse an instance identifier from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| IdentityError::InvalidKeyLength {
                expected: 32,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Generate a random instance identifier (for tests and simulations).
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Get the identifier as bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short display form for logging (first 8 hex chars).
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.short_id())
    }
}

//! Content addressing
//!
//! A content address is the BLAKE3 hash of an entry's canonical bytes,
//! recorded by whoever first referenced the content. Any peer can later
//! serve the entry; the hash is what ties the bytes to the original
//! publication.

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use portico_core::InstanceId;

/// Canonical BLAKE3 hash of an entry's bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", hex::encode(&self.0[..4]))
    }
}

/// Compute the canonical hash of an entry's bytes.
pub fn canonical_hash(entry: &[u8]) -> ContentHash {
    ContentHash(*blake3::hash(entry).as_bytes())
}

/// Location of an entry inside a remote module.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryAddress(pub [u8; 32]);

impl EntryAddress {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for EntryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for EntryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryAddress({})", hex::encode(&self.0[..4]))
    }
}

/// A verifiable reference to remotely-published content.
///
/// `expected_hash` is the hash recorded at the time the referencing
/// record was created; `verify_and_fetch` holds fetched bytes against
/// it before they are trusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    /// The network instance the entry lives in.
    pub instance: InstanceId,
    /// Where to fetch the entry from.
    pub address: EntryAddress,
    /// The canonical hash the fetched bytes must match.
    pub expected_hash: ContentHash,
}

impl ContentRef {
    /// Build a reference to known content, recording its current hash.
    pub fn to_entry(instance: InstanceId, address: EntryAddress, entry: &[u8]) -> Self {
        Self {
            instance,
            address,
            expected_hash: canonical_hash(entry),
        }
    }
}

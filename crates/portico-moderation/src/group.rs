//! Moderation groups
//!
//! A group is the authority behind a moderation viewpoint: only its
//! admins and members may append moderation actions for subjects under
//! that viewpoint.

use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use portico_core::PeerId;

/// Identifier of a moderation group.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub [u8; 32]);

impl GroupId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Generate a random group identifier (for tests and simulations).
    pub fn random() -> Self {
        Self(rand::random())
    }

    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({})", self.short_id())
    }
}

/// Identifier of a moderated subject (an entry in the base listing).
pub type SubjectId = [u8; 32];

/// A moderation group: admins plus members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub admins: BTreeSet<PeerId>,
    pub members: BTreeSet<PeerId>,
}

impl Group {
    pub fn new(id: GroupId, admins: impl IntoIterator<Item = PeerId>) -> Self {
        Self {
            id,
            admins: admins.into_iter().collect(),
            members: BTreeSet::new(),
        }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = PeerId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    /// Whether a peer may author moderation actions for this group.
    pub fn is_member(&self, peer: &PeerId) -> bool {
        self.admins.contains(peer) || self.members.contains(peer)
    }
}

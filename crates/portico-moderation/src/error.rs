//! Moderation error types
//!
//! These are local validation errors with no retry semantics.

use thiserror::Error;

use portico_core::PeerId;

use crate::group::GroupId;

/// Errors raised by the moderation overlay
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// The author is in neither the group's admin nor member set.
    #[error("Agent {author} is not a member of group {group}")]
    NotGroupMember { group: GroupId, author: PeerId },
}

//! Moderation state types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use portico_core::PeerId;

use crate::group::{GroupId, SubjectId};

/// Metadata key whose boolean `true` value marks a subject as removed.
pub const REMOVE_KEY: &str = "remove";

/// One appended moderation state transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModerationAction {
    /// The group under whose viewpoint the action was taken.
    pub group: GroupId,
    /// The moderated subject in the base listing.
    pub subject: SubjectId,
    /// Who appended the action; always in the group's admin/member set.
    pub author: PeerId,
    /// When the action was appended (ms since epoch).
    pub published_at: i64,
    /// Human-readable reason.
    pub message: String,
    /// Free-form metadata; the `remove` key drives visibility.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl ModerationAction {
    /// Whether this action marks the subject as removed.
    ///
    /// Only a boolean `true` counts; a missing key or a non-boolean
    /// value leaves the subject visible.
    pub fn removes_subject(&self) -> bool {
        matches!(
            self.metadata.get(REMOVE_KEY),
            Some(serde_json::Value::Bool(true))
        )
    }
}

/// The moderated state of one (group, subject) pair.
///
/// Created lazily on the first moderation action for the pair and never
/// deleted. A subject whose latest action has `remove == false` behaves
/// exactly like an unmoderated one for projection purposes; the
/// non-empty history is what distinguishes "restored" from "never
/// moderated" for audit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeratedState {
    /// The latest appended action.
    pub current: ModerationAction,
    /// All prior actions, oldest first (excludes `current`).
    pub history: Vec<ModerationAction>,
}

impl ModeratedState {
    /// Build from a non-empty, oldest-first action log.
    pub(crate) fn from_log(mut log: Vec<ModerationAction>) -> Option<Self> {
        let current = log.pop()?;
        Some(Self {
            current,
            history: log,
        })
    }

    /// Whether the subject is currently excluded from the visible
    /// projection.
    pub fn is_removed(&self) -> bool {
        self.current.removes_subject()
    }
}

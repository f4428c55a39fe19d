//! Moderation overlay
//!
//! Append-only logs per (group, subject) with derived projections.
//! Projections are computed per query, never cached here; callers that
//! need caching maintain their own. DashMap entry locking serializes
//! concurrent appends to the same (group, subject) pair.

use std::collections::BTreeMap;

use dashmap::DashMap;
use tracing::{debug, info};

use portico_core::PeerId;

use crate::error::ModerationError;
use crate::group::{Group, GroupId, SubjectId};
use crate::state::{ModeratedState, ModerationAction};

/// Group-scoped visibility layer over a base listing.
#[derive(Default)]
pub struct ModerationOverlay {
    groups: DashMap<GroupId, Group>,
    /// Append-only action log per (group, subject).
    log: DashMap<(GroupId, SubjectId), Vec<ModerationAction>>,
}

impl ModerationOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a group definition.
    pub fn upsert_group(&self, group: Group) {
        debug!(group = %group.id.short_id(), "Upserting moderation group");
        self.groups.insert(group.id, group);
    }

    /// Fetch a group definition.
    pub fn group(&self, id: &GroupId) -> Option<Group> {
        self.groups.get(id).map(|entry| entry.clone())
    }

    /// Append a new moderated state for (group, subject), returning the
    /// derived state after the append.
    ///
    /// Only an identity in the group's admin or member set may append;
    /// anyone else gets [`ModerationError::NotGroupMember`] and the log
    /// is untouched. The append never overwrites history.
    pub fn update_state(
        &self,
        group_id: GroupId,
        author: PeerId,
        subject: SubjectId,
        message: impl Into<String>,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Result<ModeratedState, ModerationError> {
        let group = self
            .groups
            .get(&group_id)
            .ok_or(ModerationError::GroupNotFound(group_id))?;
        if !group.is_member(&author) {
            return Err(ModerationError::NotGroupMember {
                group: group_id,
                author,
            });
        }
        drop(group);

        let action = ModerationAction {
            group: group_id,
            subject,
            author,
            published_at: chrono::Utc::now().timestamp_millis(),
            message: message.into(),
            metadata,
        };

        // Entry locking serializes concurrent appends to this pair.
        let mut log = self.log.entry((group_id, subject)).or_default();
        let history = log.clone();
        log.push(action.clone());
        drop(log);

        info!(
            group = %group_id.short_id(),
            author = %author.short_id(),
            removed = action.removes_subject(),
            "Appended moderation action"
        );
        Ok(ModeratedState {
            current: action,
            history,
        })
    }

    /// The current moderated state for (group, subject), if any action
    /// was ever taken.
    pub fn get_moderated_state(
        &self,
        group_id: &GroupId,
        subject: &SubjectId,
    ) -> Option<ModeratedState> {
        self.log
            .get(&(*group_id, *subject))
            .and_then(|log| ModeratedState::from_log(log.clone()))
    }

    /// Full ordered action history for (group, subject), oldest first.
    pub fn action_history(
        &self,
        group_id: &GroupId,
        subject: &SubjectId,
    ) -> Vec<ModerationAction> {
        self.log
            .get(&(*group_id, *subject))
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Subject ids currently removed under this group's viewpoint.
    fn removed_ids(&self, group_id: &GroupId) -> Vec<SubjectId> {
        self.log
            .iter()
            .filter(|entry| entry.key().0 == *group_id)
            .filter(|entry| {
                entry
                    .value()
                    .last()
                    .map(|action| action.removes_subject())
                    .unwrap_or(false)
            })
            .map(|entry| entry.key().1)
            .collect()
    }

    /// The base listing minus all subjects currently removed.
    ///
    /// Computed per query; unmoderated and restored subjects are
    /// indistinguishable here.
    pub fn visible_subjects(&self, group_id: &GroupId, base: &[SubjectId]) -> Vec<SubjectId> {
        let removed = self.removed_ids(group_id);
        base.iter()
            .filter(|subject| !removed.contains(subject))
            .copied()
            .collect()
    }

    /// The complementary projection: subjects of the base listing
    /// currently removed under this group's viewpoint.
    pub fn removed_subjects(&self, group_id: &GroupId, base: &[SubjectId]) -> Vec<SubjectId> {
        let removed = self.removed_ids(group_id);
        base.iter()
            .filter(|subject| removed.contains(subject))
            .copied()
            .collect()
    }
}

//! Host registration records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use portico_core::{InstanceId, PeerId};

use crate::grant::CapabilityGrant;

/// A peer's active registration for one network instance.
///
/// There is at most one active record per (peer, instance) pair; a
/// superseding registration replaces the grant, it does not accumulate
/// permission sets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    /// The registering peer (self-registration).
    pub peer: PeerId,
    /// The instance the capability is advertised under.
    pub instance: InstanceId,
    /// What callers may invoke.
    pub grant: CapabilityGrant,
    /// First registration time (ms since epoch); preserved across upserts.
    pub registered_at: i64,
    /// Last upsert time (ms since epoch).
    pub updated_at: i64,
    /// Free-form metadata attached by the host.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

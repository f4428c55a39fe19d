//! Host directory
//!
//! Alias-keyed registry of host records, read by many concurrent
//! lookups and written only by registration events. DashMap sharding
//! gives concurrent readers with single-writer-at-a-time discipline per
//! (peer, instance) key; no cross-key locking is required.

use std::collections::BTreeMap;

use dashmap::DashMap;
use tracing::{debug, info};

use portico_core::{CallTarget, InstanceId, PeerId};

use crate::error::DirectoryError;
use crate::grant::CapabilityGrant;
use crate::record::HostRecord;

/// Registry of peers that have advertised a capability, per instance.
#[derive(Default)]
pub struct HostDirectory {
    /// Human alias -> instance identifier.
    aliases: DashMap<String, InstanceId>,
    /// Instance -> active record per peer.
    hosts: DashMap<InstanceId, BTreeMap<PeerId, HostRecord>>,
}

impl HostDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a network instance under a human alias.
    ///
    /// Lookups and registrations refer to instances by alias; an alias
    /// that was never added yields [`DirectoryError::UnknownAlias`].
    pub fn add_instance(&self, alias: impl Into<String>, instance: InstanceId) {
        let alias = alias.into();
        debug!(alias = %alias, instance = %instance.short_id(), "Adding instance alias");
        self.aliases.insert(alias, instance);
    }

    /// Resolve an alias to its instance identifier.
    pub fn resolve_alias(&self, alias: &str) -> Result<InstanceId, DirectoryError> {
        self.aliases
            .get(alias)
            .map(|entry| *entry.value())
            .ok_or_else(|| DirectoryError::UnknownAlias(alias.to_string()))
    }

    /// Upsert a host record for (peer, instance).
    ///
    /// A superseding registration replaces the grant and metadata; it
    /// does not merge permission sets. The original registration time is
    /// preserved.
    pub fn register(
        &self,
        peer: PeerId,
        alias: &str,
        grant: CapabilityGrant,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Result<HostRecord, DirectoryError> {
        let instance = self.resolve_alias(alias)?;
        let now = chrono::Utc::now().timestamp_millis();

        let mut records = self.hosts.entry(instance).or_default();
        let registered_at = records
            .get(&peer)
            .map(|existing| existing.registered_at)
            .unwrap_or(now);

        let record = HostRecord {
            peer,
            instance,
            grant,
            registered_at,
            updated_at: now,
            metadata,
        };
        records.insert(peer, record.clone());

        info!(
            peer = %peer.short_id(),
            alias = %alias,
            grant = record.grant.label(),
            "Registered host"
        );
        Ok(record)
    }

    /// Withdraw a peer's registration for an instance.
    ///
    /// Returns whether a record was actually removed.
    pub fn deregister(&self, peer: &PeerId, alias: &str) -> Result<bool, DirectoryError> {
        let instance = self.resolve_alias(alias)?;
        let removed = self
            .hosts
            .get_mut(&instance)
            .map(|mut records| records.remove(peer).is_some())
            .unwrap_or(false);
        if removed {
            info!(peer = %peer.short_id(), alias = %alias, "Deregistered host");
        }
        Ok(removed)
    }

    /// All host records for an instance, regardless of grant shape.
    ///
    /// A known alias with no hosts is a valid empty result, not an
    /// error.
    pub fn lookup(&self, alias: &str) -> Result<Vec<HostRecord>, DirectoryError> {
        let instance = self.resolve_alias(alias)?;
        Ok(self
            .hosts
            .get(&instance)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    /// Hosts whose grant currently covers the exact (module, function)
    /// pair.
    ///
    /// `Unrestricted` and `Transferable` grants cover every pair at
    /// lookup time; `Transferable` secrets are checked later, at call
    /// time, by the gateway.
    pub fn lookup_for_capability(
        &self,
        alias: &str,
        target: &CallTarget,
    ) -> Result<Vec<HostRecord>, DirectoryError> {
        let records = self.lookup(alias)?;
        Ok(records
            .into_iter()
            .filter(|record| match &record.grant {
                CapabilityGrant::Unrestricted => true,
                CapabilityGrant::Transferable { .. } => true,
                CapabilityGrant::Listed(targets) => targets.contains(target),
            })
            .collect())
    }

    /// A specific peer's record for an instance, if registered.
    pub fn find_record(
        &self,
        peer: &PeerId,
        alias: &str,
    ) -> Result<Option<HostRecord>, DirectoryError> {
        let instance = self.resolve_alias(alias)?;
        Ok(self
            .hosts
            .get(&instance)
            .and_then(|records| records.get(peer).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with_instance(alias: &str) -> HostDirectory {
        let directory = HostDirectory::new();
        directory.add_instance(alias, InstanceId::random());
        directory
    }

    #[test]
    fn test_lookup_unknown_alias_is_error() {
        let directory = HostDirectory::new();
        let err = directory.lookup("nowhere").unwrap_err();
        assert!(matches!(err, DirectoryError::UnknownAlias(ref a) if a == "nowhere"));
    }

    #[test]
    fn test_lookup_known_alias_with_no_hosts_is_empty() {
        let directory = directory_with_instance("devhub");
        let hosts = directory.lookup("devhub").unwrap();
        assert!(hosts.is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let directory = directory_with_instance("devhub");
        let peer = PeerId::random();

        directory
            .register(peer, "devhub", CapabilityGrant::Unrestricted, BTreeMap::new())
            .unwrap();

        let hosts = directory.lookup("devhub").unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].peer, peer);
    }

    #[test]
    fn test_reregistration_replaces_grant() {
        let directory = directory_with_instance("devhub");
        let peer = PeerId::random();

        directory
            .register(
                peer,
                "devhub",
                CapabilityGrant::listed([("lib", "fn")]),
                BTreeMap::new(),
            )
            .unwrap();
        directory
            .register(
                peer,
                "devhub",
                CapabilityGrant::listed([("lib", "other")]),
                BTreeMap::new(),
            )
            .unwrap();

        // One record, new grant, permission sets not merged.
        let hosts = directory.lookup("devhub").unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(
            hosts[0].grant,
            CapabilityGrant::listed([("lib", "other")])
        );
    }

    #[test]
    fn test_reregistration_preserves_registered_at() {
        let directory = directory_with_instance("devhub");
        let peer = PeerId::random();

        let first = directory
            .register(peer, "devhub", CapabilityGrant::Unrestricted, BTreeMap::new())
            .unwrap();
        let second = directory
            .register(peer, "devhub", CapabilityGrant::Unrestricted, BTreeMap::new())
            .unwrap();

        assert_eq!(second.registered_at, first.registered_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn test_lookup_for_capability_filters_listed_grants() {
        let directory = directory_with_instance("devhub");
        let listed_peer = PeerId::random();
        let open_peer = PeerId::random();
        let conditional_peer = PeerId::random();

        directory
            .register(
                listed_peer,
                "devhub",
                CapabilityGrant::listed([("lib", "fn")]),
                BTreeMap::new(),
            )
            .unwrap();
        directory
            .register(
                open_peer,
                "devhub",
                CapabilityGrant::Unrestricted,
                BTreeMap::new(),
            )
            .unwrap();
        directory
            .register(
                conditional_peer,
                "devhub",
                CapabilityGrant::transferable(b"secret"),
                BTreeMap::new(),
            )
            .unwrap();

        let covered = directory
            .lookup_for_capability("devhub", &("lib", "fn").into())
            .unwrap();
        assert_eq!(covered.len(), 3);

        // Only the unrestricted and transferable hosts cover other pairs.
        let covered = directory
            .lookup_for_capability("devhub", &("lib", "other").into())
            .unwrap();
        let peers: Vec<_> = covered.iter().map(|r| r.peer).collect();
        assert_eq!(covered.len(), 2);
        assert!(peers.contains(&open_peer));
        assert!(peers.contains(&conditional_peer));
    }

    #[test]
    fn test_registrations_are_scoped_per_instance() {
        let directory = HostDirectory::new();
        directory.add_instance("one", InstanceId::random());
        directory.add_instance("two", InstanceId::random());

        let peer = PeerId::random();
        directory
            .register(peer, "one", CapabilityGrant::Unrestricted, BTreeMap::new())
            .unwrap();

        assert_eq!(directory.lookup("one").unwrap().len(), 1);
        assert!(directory.lookup("two").unwrap().is_empty());
    }

    #[test]
    fn test_deregister() {
        let directory = directory_with_instance("devhub");
        let peer = PeerId::random();

        directory
            .register(peer, "devhub", CapabilityGrant::Unrestricted, BTreeMap::new())
            .unwrap();

        assert!(directory.deregister(&peer, "devhub").unwrap());
        assert!(directory.lookup("devhub").unwrap().is_empty());
        // Second deregister finds nothing to remove.
        assert!(!directory.deregister(&peer, "devhub").unwrap());
    }

    #[test]
    fn test_find_record() {
        let directory = directory_with_instance("devhub");
        let peer = PeerId::random();
        let stranger = PeerId::random();

        directory
            .register(peer, "devhub", CapabilityGrant::Unrestricted, BTreeMap::new())
            .unwrap();

        assert!(directory.find_record(&peer, "devhub").unwrap().is_some());
        assert!(directory.find_record(&stranger, "devhub").unwrap().is_none());
    }
}

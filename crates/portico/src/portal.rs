//! The Portal facade
//!
//! Composes directory, prober, selector, and gateway into the surface
//! the record/CRUD layer, UI, and CLI talk to. The control flow for a
//! remote call: capability lookup in the directory, race across the
//! candidates, capability-checked invocation of each racer, first
//! success wins.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, instrument};

use portico_content::{ContentRef, EntryFetcher, VersionedEntry};
use portico_core::{CallTarget, HostTransport, InstanceId, PeerId};
use portico_directory::{CapabilityGrant, HostDirectory, HostRecord};
use portico_moderation::{
    Group, GroupId, ModeratedState, ModerationAction, ModerationOverlay, SubjectId,
};
use portico_portal::{Gateway, ProbeConfig, Prober, SelectConfig, select_and_call};

use crate::error::Result;

/// Portal configuration
#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    pub probe: ProbeConfig,
    pub select: SelectConfig,
}

/// A remote call request against whichever live host wins the race.
#[derive(Clone, Debug)]
pub struct RemoteCallRequest {
    /// Instance alias the call is scoped to.
    pub alias: String,
    /// Module/function to invoke.
    pub target: CallTarget,
    /// Opaque payload, forwarded verbatim.
    pub payload: Bytes,
    /// Secret for hosts registered with a conditional grant.
    pub secret: Option<Vec<u8>>,
    /// Per-candidate deadline; falls back to the configured default.
    pub timeout: Option<Duration>,
}

/// Client-facing entry point of the marketplace layer.
pub struct Portal {
    local: PeerId,
    directory: Arc<HostDirectory>,
    prober: Prober,
    gateway: Gateway,
    overlay: ModerationOverlay,
    config: PortalConfig,
}

impl Portal {
    pub fn new(local: PeerId, transport: Arc<dyn HostTransport>, config: PortalConfig) -> Self {
        let directory = Arc::new(HostDirectory::new());
        let prober = Prober::new(transport.clone());
        let gateway = Gateway::new(directory.clone(), transport);
        Self {
            local,
            directory,
            prober,
            gateway,
            overlay: ModerationOverlay::new(),
            config,
        }
    }

    /// Our own peer identity.
    pub fn local_peer(&self) -> PeerId {
        self.local
    }

    /// Direct access to the host directory.
    pub fn directory(&self) -> &HostDirectory {
        &self.directory
    }

    /// Direct access to the moderation overlay.
    pub fn overlay(&self) -> &ModerationOverlay {
        &self.overlay
    }

    // ============================================================
    // Host registration and lookup
    // ============================================================

    /// Register a network instance under a human alias.
    pub fn add_instance(&self, alias: impl Into<String>, instance: InstanceId) {
        self.directory.add_instance(alias, instance);
    }

    /// Self-register as a host for the instance behind `alias`.
    ///
    /// A superseding registration replaces the previous grant.
    pub fn register_host(&self, alias: &str, grant: CapabilityGrant) -> Result<HostRecord> {
        Ok(self
            .directory
            .register(self.local, alias, grant, BTreeMap::new())?)
    }

    /// All hosts registered for an instance, regardless of grant shape.
    pub fn get_registered_hosts(&self, alias: &str) -> Result<Vec<HostRecord>> {
        Ok(self.directory.lookup(alias)?)
    }

    /// Hosts whose grant covers the exact (module, function) pair.
    pub fn get_hosts_for_capability(
        &self,
        alias: &str,
        target: &CallTarget,
    ) -> Result<Vec<HostRecord>> {
        Ok(self.directory.lookup_for_capability(alias, target)?)
    }

    // ============================================================
    // Liveness and invocation
    // ============================================================

    /// Explicit liveness check against one peer.
    ///
    /// An offline peer resolves `false`; a timeout stays an error
    /// because the peer's state is unknown.
    pub async fn ping(&self, peer: &PeerId, timeout: Option<Duration>) -> Result<bool> {
        let timeout =
            timeout.unwrap_or_else(|| Duration::from_millis(self.config.probe.timeout_ms));
        Ok(self.prober.ping(peer, timeout).await?)
    }

    /// Invoke a specific host directly, without racing.
    ///
    /// Capability checks still apply; this is the path for callers that
    /// cached a winning host from a previous race.
    pub async fn call_host(
        &self,
        host: &PeerId,
        request: RemoteCallRequest,
    ) -> Result<Bytes> {
        let timeout = request
            .timeout
            .unwrap_or_else(|| Duration::from_millis(self.config.select.call_timeout_ms));
        Ok(self
            .gateway
            .invoke(
                host,
                &request.alias,
                &request.target,
                request.payload,
                request.secret.as_deref(),
                timeout,
            )
            .await?)
    }

    /// Race the call across every host currently advertising the
    /// capability; first success wins, losers are discarded.
    ///
    /// The race must only carry idempotent reads: a losing invocation
    /// may still have executed on its host.
    #[instrument(skip(self, request), fields(alias = %request.alias, target = %request.target))]
    pub async fn remote_call(&self, request: RemoteCallRequest) -> Result<Bytes> {
        let candidates = self
            .directory
            .lookup_for_capability(&request.alias, &request.target)?;
        debug!(candidates = candidates.len(), "Racing remote call");

        let timeout = request
            .timeout
            .unwrap_or_else(|| Duration::from_millis(self.config.select.call_timeout_ms));

        let gateway = self.gateway.clone();
        let response = select_and_call(candidates, timeout, move |host| {
            let gateway = gateway.clone();
            let alias = request.alias.clone();
            let target = request.target.clone();
            let payload = request.payload.clone();
            let secret = request.secret.clone();
            async move {
                gateway
                    .invoke(
                        &host.peer,
                        &alias,
                        &target,
                        payload,
                        secret.as_deref(),
                        timeout,
                    )
                    .await
            }
        })
        .await?;

        Ok(response)
    }

    // ============================================================
    // Content trust
    // ============================================================

    /// Fetch the referenced entry and verify it against its recorded
    /// content address before trusting it.
    pub async fn verify_and_fetch(
        &self,
        content_ref: &ContentRef,
        fetcher: &dyn EntryFetcher,
    ) -> Result<Bytes> {
        Ok(portico_content::verify_and_fetch(content_ref, fetcher).await?)
    }

    /// The entry with the greatest semantic version.
    pub fn resolve_latest(&self, entries: Vec<VersionedEntry>) -> Result<VersionedEntry> {
        Ok(portico_content::latest(entries)?)
    }

    // ============================================================
    // Moderation overlay
    // ============================================================

    /// Add or replace a moderation group definition.
    pub fn upsert_group(&self, group: Group) {
        self.overlay.upsert_group(group);
    }

    /// Append a new moderated state for (group, subject), authored by
    /// the local peer, and return the derived state after the append.
    pub fn update_moderated_state(
        &self,
        group: GroupId,
        subject: SubjectId,
        message: impl Into<String>,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Result<ModeratedState> {
        Ok(self
            .overlay
            .update_state(group, self.local, subject, message, metadata)?)
    }

    /// Current moderated state for (group, subject), if any.
    pub fn get_moderated_state(
        &self,
        group: &GroupId,
        subject: &SubjectId,
    ) -> Option<ModeratedState> {
        self.overlay.get_moderated_state(group, subject)
    }

    /// Full ordered action history for (group, subject), oldest first.
    pub fn action_history(&self, group: &GroupId, subject: &SubjectId) -> Vec<ModerationAction> {
        self.overlay.action_history(group, subject)
    }

    /// The base listing minus subjects removed under this group.
    pub fn visible_subjects(&self, group: &GroupId, base: &[SubjectId]) -> Vec<SubjectId> {
        self.overlay.visible_subjects(group, base)
    }

    /// Subjects of the base listing removed under this group.
    pub fn removed_subjects(&self, group: &GroupId, base: &[SubjectId]) -> Vec<SubjectId> {
        self.overlay.removed_subjects(group, base)
    }
}

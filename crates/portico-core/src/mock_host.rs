//! Mock host network for testing
//!
//! Provides an in-memory [`HostTransport`] so probe/select/invoke logic
//! can be exercised without real network connections. Each registered
//! peer has a configurable response latency, an online flag, and a
//! handler closure that plays the role of the host's module logic.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use portico_core::{MockHostNet, PeerId, HostTransport};
//!
//! let net = MockHostNet::new();
//! let host = PeerId::random();
//! net.add_host(host, MockHostBehavior::echo());
//!
//! net.probe(&host).await.unwrap();
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::call::RemoteCall;
use crate::error::TransportError;
use crate::identity::PeerId;
use crate::transport::HostTransport;

/// Handler closure standing in for a host's module logic.
pub type MockHandler = Arc<dyn Fn(RemoteCall) -> Result<Bytes, String> + Send + Sync>;

/// Configurable behavior of a single mock host.
#[derive(Clone)]
pub struct MockHostBehavior {
    /// Artificial delay before every probe/invoke response.
    pub latency: Duration,
    /// When false, probes and invokes fail as offline.
    pub online: bool,
    /// Host-side logic; an `Err` becomes a remote execution failure.
    pub handler: MockHandler,
}

impl MockHostBehavior {
    /// A host that echoes call payloads back immediately.
    pub fn echo() -> Self {
        Self {
            latency: Duration::ZERO,
            online: true,
            handler: Arc::new(|call| Ok(call.payload)),
        }
    }

    /// A host that echoes payloads after a fixed delay.
    pub fn echo_after(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::echo()
        }
    }

    /// A host that answers every call with a fixed response.
    pub fn responder(response: Bytes) -> Self {
        Self {
            latency: Duration::ZERO,
            online: true,
            handler: Arc::new(move |_| Ok(response.clone())),
        }
    }

    /// A host whose module logic always fails.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            latency: Duration::ZERO,
            online: true,
            handler: Arc::new(move |_| Err(message.clone())),
        }
    }

    /// A host with custom module logic.
    pub fn with_handler(
        handler: impl Fn(RemoteCall) -> Result<Bytes, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            latency: Duration::ZERO,
            online: true,
            handler: Arc::new(handler),
        }
    }

    /// Set the response latency.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// An in-memory network of mock hosts.
///
/// Cheap to clone via `Arc`; tests typically share one instance between
/// the portal under test and the host-side setup code.
#[derive(Default)]
pub struct MockHostNet {
    hosts: DashMap<PeerId, MockHostBehavior>,
}

impl MockHostNet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host on the mock network, replacing any existing one.
    pub fn add_host(&self, peer: PeerId, behavior: MockHostBehavior) {
        self.hosts.insert(peer, behavior);
    }

    /// Remove a host entirely (probes will report it offline).
    pub fn remove_host(&self, peer: &PeerId) {
        self.hosts.remove(peer);
    }

    /// Flip a host's online flag without losing its handler.
    pub fn set_online(&self, peer: &PeerId, online: bool) {
        if let Some(mut entry) = self.hosts.get_mut(peer) {
            entry.online = online;
        }
    }

    fn behavior(&self, peer: &PeerId) -> Result<MockHostBehavior, TransportError> {
        let behavior = self
            .hosts
            .get(peer)
            .ok_or_else(|| TransportError::Offline(peer.short_id()))?
            .clone();
        if !behavior.online {
            return Err(TransportError::Offline(peer.short_id()));
        }
        Ok(behavior)
    }
}

#[async_trait]
impl HostTransport for MockHostNet {
    async fn probe(&self, peer: &PeerId) -> Result<(), TransportError> {
        let behavior = self.behavior(peer)?;
        tokio::time::sleep(behavior.latency).await;
        Ok(())
    }

    async fn invoke(&self, peer: &PeerId, call: RemoteCall) -> Result<Bytes, TransportError> {
        let behavior = self.behavior(peer)?;
        tokio::time::sleep(behavior.latency).await;
        (behavior.handler)(call).map_err(TransportError::Remote)
    }
}

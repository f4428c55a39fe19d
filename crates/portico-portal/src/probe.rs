//! Liveness probing
//!
//! Bounded-time probes against candidate hosts. Used standalone for
//! explicit liveness checks (`ping`) and implicitly as the failure
//! classification inside the invocation race.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use portico_core::{HostTransport, PeerId, TransportError};

use crate::error::ProbeError;

/// Probe configuration
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Default probe deadline in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

/// Issues bounded-time liveness probes over a [`HostTransport`].
#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn HostTransport>,
}

impl Prober {
    pub fn new(transport: Arc<dyn HostTransport>) -> Self {
        Self { transport }
    }

    /// Probe a peer, failing with [`ProbeError::Timeout`] if no answer
    /// arrives within the deadline.
    ///
    /// A connection-refused/offline condition is a distinct error from a
    /// timeout so callers can tell "known dead" from "unknown".
    pub async fn probe(&self, peer: &PeerId, timeout: Duration) -> Result<(), ProbeError> {
        let result = tokio::time::timeout(timeout, self.transport.probe(peer)).await;

        match result {
            Err(_) => {
                debug!(peer = %peer.short_id(), timeout_ms = timeout.as_millis() as u64, "Probe timed out");
                Err(ProbeError::Timeout(timeout.as_millis() as u64))
            }
            Ok(Err(TransportError::Offline(reason))) => Err(ProbeError::Offline(reason)),
            Ok(Err(other)) => Err(ProbeError::Transport(other.to_string())),
            Ok(Ok(())) => Ok(()),
        }
    }

    /// Convenience wrapper resolving to a boolean liveness verdict.
    ///
    /// An offline peer is a definitive `false`; a timeout remains an
    /// error because the peer's state is unknown.
    pub async fn ping(&self, peer: &PeerId, timeout: Duration) -> Result<bool, ProbeError> {
        match self.probe(peer, timeout).await {
            Ok(()) => Ok(true),
            Err(ProbeError::Offline(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

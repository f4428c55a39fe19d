//! Host transport seam
//!
//! The portal layer (probe, select, invoke) is written against this
//! trait so the same protocol logic runs over an in-memory mock network
//! in tests and a real transport in production.

use async_trait::async_trait;
use bytes::Bytes;

use crate::call::RemoteCall;
use crate::error::TransportError;
use crate::identity::PeerId;

/// Transport operations against a single remote host.
///
/// Implementations perform network I/O only; they apply no deadline of
/// their own. Callers bound each operation with an explicit timeout so
/// that per-candidate timeouts in a race stay independent.
#[async_trait]
pub trait HostTransport: Send + Sync {
    /// Send a lightweight liveness request to a peer.
    ///
    /// Resolves `Ok(())` if the peer answered. An unreachable or
    /// refusing peer yields [`TransportError::Offline`].
    async fn probe(&self, peer: &PeerId) -> Result<(), TransportError>;

    /// Forward a call to a peer and return its response verbatim.
    ///
    /// A host-side execution failure is reported as
    /// [`TransportError::Remote`]; reachability failures use the other
    /// variants.
    async fn invoke(&self, peer: &PeerId, call: RemoteCall) -> Result<Bytes, TransportError>;
}

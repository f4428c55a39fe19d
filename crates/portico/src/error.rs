//! Unified error type for the Portico facade
//!
//! Wraps the per-layer errors so callers of [`Portal`](crate::Portal)
//! handle one enum. The named kinds from the protocol surface
//! (`UnknownAlias`, `NoHostRecord`, `CapabilityDenied`,
//! `ConditionalAccessDenied`, `RemoteExecutionFailed`,
//! `AllHostsUnreachable`, `HashMismatch`, `NoVersionsAvailable`,
//! `NotGroupMember`) stay reachable through these wrappers.

use thiserror::Error;

use portico_content::ContentError;
use portico_directory::DirectoryError;
use portico_moderation::ModerationError;
use portico_portal::{GatewayError, ProbeError, SelectError};

/// Result type alias for Portal operations.
pub type Result<T> = std::result::Result<T, PorticoError>;

/// Unified error type for the Portico facade.
#[derive(Debug, Error)]
pub enum PorticoError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Select(SelectError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Moderation(#[from] ModerationError),
}

impl From<SelectError> for PorticoError {
    fn from(e: SelectError) -> Self {
        match e {
            // A sole candidate's permission/execution failure is more
            // actionable than a race verdict; surface it directly.
            SelectError::Call(gateway) => PorticoError::Gateway(gateway),
            other => PorticoError::Select(other),
        }
    }
}

impl PorticoError {
    /// Whether this is a gateway-side authorization failure, which is
    /// never retried automatically.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            PorticoError::Gateway(
                GatewayError::NoHostRecord { .. }
                    | GatewayError::CapabilityDenied { .. }
                    | GatewayError::ConditionalAccessDenied
            )
        )
    }
}

//! Portal error types
//!
//! Gateway-side authorization errors (`NoHostRecord`, `CapabilityDenied`,
//! `ConditionalAccessDenied`) indicate a configuration or permission
//! problem, never a transient failure, and are therefore never retried.
//! Transport-level failures (timeout, offline) are "retried" only in the
//! sense that the selector races other candidates.

use thiserror::Error;

use portico_core::{CallTarget, PeerId};
use portico_directory::DirectoryError;

/// Errors from a standalone liveness probe
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probe did not complete within its deadline. Distinct from a
    /// connection-refused/offline condition.
    #[error("Probe timed out after {0}ms")]
    Timeout(u64),

    /// The peer refused the connection or is unreachable.
    #[error("Peer is offline: {0}")]
    Offline(String),

    /// Any other transport failure.
    #[error("Probe transport error: {0}")]
    Transport(String),
}

/// Errors from a single capability-checked invocation
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The instance alias has never been registered.
    #[error("Unknown network instance alias: {0}")]
    UnknownAlias(String),

    /// The host has no current registration for this instance.
    #[error("No host record for peer {peer} on instance alias '{alias}'")]
    NoHostRecord { peer: PeerId, alias: String },

    /// The host's grant does not list this (module, function) pair.
    #[error("No capability granted for {target}")]
    CapabilityDenied { target: CallTarget },

    /// The host's grant is conditional and the presented secret did not
    /// match.
    #[error("Access is conditional")]
    ConditionalAccessDenied,

    /// The host was reached but its module logic failed.
    #[error("Remote execution failed: {0}")]
    RemoteExecutionFailed(String),

    /// The invocation did not complete within its deadline.
    #[error("Invocation timed out after {0}ms")]
    Timeout(u64),

    /// The host could not be reached at all.
    #[error("Host is offline: {0}")]
    Offline(String),
}

impl GatewayError {
    /// Whether this failure is a liveness condition (timeout/offline)
    /// rather than a permission or execution problem.
    ///
    /// The selector treats liveness failures as ordinary race losses;
    /// non-liveness failures are logged but change the aggregate verdict
    /// only when the failing host was the sole candidate.
    pub fn is_liveness_failure(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Offline(_))
    }
}

impl From<DirectoryError> for GatewayError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::UnknownAlias(alias) => GatewayError::UnknownAlias(alias),
        }
    }
}

/// One candidate's failure inside a race.
#[derive(Debug, Clone)]
pub struct HostFailure {
    /// The candidate that failed.
    pub peer: PeerId,
    /// Rendered failure message.
    pub error: String,
    /// Whether the failure was a liveness condition.
    pub liveness: bool,
}

/// Errors from racing an invocation across candidates
#[derive(Debug, Error)]
pub enum SelectError {
    /// Every candidate failed or timed out. Produced only once all
    /// candidates have concluded.
    #[error("All hosts unreachable ({count} candidates tried)")]
    AllHostsUnreachable {
        count: usize,
        failures: Vec<HostFailure>,
    },

    /// The sole candidate failed for a non-liveness reason; the
    /// underlying error is surfaced as-is.
    #[error(transparent)]
    Call(#[from] GatewayError),
}

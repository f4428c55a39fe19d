//! Capability grant model
//!
//! A registering host attaches one grant describing what callers may
//! invoke. Grants are evaluated per (module, function) pair at call
//! time, through the single [`CapabilityGrant::covers`] entry point, so
//! that an invocation not covered by the grant fails before any host
//! logic runs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use portico_core::CallTarget;

/// What a registering host permits callers to invoke.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityGrant {
    /// Any caller, any function on the registered module set.
    Unrestricted,
    /// Callers may invoke only the exact pairs listed.
    Listed(BTreeSet<CallTarget>),
    /// Callers must present a matching secret; otherwise unrestricted.
    ///
    /// Only the blake3 hash of the secret is stored.
    Transferable { secret_hash: [u8; 32] },
}

/// Outcome of evaluating a grant against a call target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// The call is permitted.
    Granted,
    /// The grant does not list this (module, function) pair.
    NotGranted,
    /// The grant is conditional and the presented secret did not match.
    SecretMismatch,
}

impl Coverage {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl CapabilityGrant {
    /// Build a `Listed` grant from (module, function) pairs.
    pub fn listed<T: Into<CallTarget>>(targets: impl IntoIterator<Item = T>) -> Self {
        Self::Listed(targets.into_iter().map(Into::into).collect())
    }

    /// Build a `Transferable` grant from a raw secret.
    pub fn transferable(secret: &[u8]) -> Self {
        Self::Transferable {
            secret_hash: hash_secret(secret),
        }
    }

    /// Evaluate this grant against a call target.
    ///
    /// `presented_secret` is only consulted for `Transferable` grants.
    /// Secret comparison is constant-time over the secret's hash to
    /// avoid timing side-channels.
    pub fn covers(&self, target: &CallTarget, presented_secret: Option<&[u8]>) -> Coverage {
        match self {
            Self::Unrestricted => Coverage::Granted,
            Self::Listed(targets) => {
                if targets.contains(target) {
                    Coverage::Granted
                } else {
                    Coverage::NotGranted
                }
            }
            Self::Transferable { secret_hash } => match presented_secret {
                Some(secret) if bool::from(hash_secret(secret).ct_eq(secret_hash)) => {
                    Coverage::Granted
                }
                _ => Coverage::SecretMismatch,
            },
        }
    }

    /// Human-readable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unrestricted => "unrestricted",
            Self::Listed(_) => "listed",
            Self::Transferable { .. } => "transferable",
        }
    }
}

/// Hash a raw capability secret for storage and comparison.
pub fn hash_secret(secret: &[u8]) -> [u8; 32] {
    *blake3::hash(secret).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_covers_everything() {
        let grant = CapabilityGrant::Unrestricted;
        assert!(grant.covers(&("any", "thing").into(), None).is_granted());
    }

    #[test]
    fn test_listed_covers_exact_pairs_only() {
        let grant = CapabilityGrant::listed([("lib", "fn"), ("lib", "other")]);

        assert!(grant.covers(&("lib", "fn").into(), None).is_granted());
        assert!(grant.covers(&("lib", "other").into(), None).is_granted());
        assert_eq!(
            grant.covers(&("lib", "missing").into(), None),
            Coverage::NotGranted
        );
        assert_eq!(
            grant.covers(&("other", "fn").into(), None),
            Coverage::NotGranted
        );
    }

    #[test]
    fn test_transferable_requires_matching_secret() {
        let grant = CapabilityGrant::transferable(b"hunter2");

        assert!(
            grant
                .covers(&("lib", "fn").into(), Some(b"hunter2"))
                .is_granted()
        );
        assert_eq!(
            grant.covers(&("lib", "fn").into(), Some(b"wrong")),
            Coverage::SecretMismatch
        );
        assert_eq!(
            grant.covers(&("lib", "fn").into(), None),
            Coverage::SecretMismatch
        );
    }

    #[test]
    fn test_transferable_ignores_target() {
        // A matching secret grants any pair.
        let grant = CapabilityGrant::transferable(b"s3cret");
        assert!(
            grant
                .covers(&("anything", "at_all").into(), Some(b"s3cret"))
                .is_granted()
        );
    }

    #[test]
    fn test_grant_labels() {
        assert_eq!(CapabilityGrant::Unrestricted.label(), "unrestricted");
        assert_eq!(
            CapabilityGrant::listed([("a", "b")]).label(),
            "listed"
        );
        assert_eq!(CapabilityGrant::transferable(b"x").label(), "transferable");
    }
}

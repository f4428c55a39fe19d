//! Version resolution
//!
//! Orders the published variants of a resource by semantic-version
//! precedence, descending, with publication time as the tie-break.
//! "Latest" is the first element of that order.

use serde::{Deserialize, Serialize};

use crate::address::ContentRef;
use crate::error::ContentError;

/// One published variant of a versioned resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedEntry {
    /// Semantic version of this variant.
    pub version: semver::Version,
    /// Verifiable reference to the variant's payload.
    pub payload_ref: ContentRef,
    /// Publication time (ms since epoch).
    pub published_at: i64,
}

/// Order entries by semver precedence descending, publication time
/// descending as the tie-break.
///
/// Entries with identical version strings are a publisher data-integrity
/// anomaly; the sort is stable, so such entries keep their relative
/// input order. That is intentional: this layer documents the anomaly
/// rather than guessing an order for it.
pub fn resolve(mut entries: Vec<VersionedEntry>) -> Vec<VersionedEntry> {
    entries.sort_by(|a, b| {
        b.version
            .cmp(&a.version)
            .then(b.published_at.cmp(&a.published_at))
    });
    entries
}

/// The entry with the greatest semantic version, or
/// [`ContentError::NoVersionsAvailable`] for an empty set.
pub fn latest(entries: Vec<VersionedEntry>) -> Result<VersionedEntry, ContentError> {
    resolve(entries)
        .into_iter()
        .next()
        .ok_or(ContentError::NoVersionsAvailable)
}

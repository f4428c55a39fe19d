//! Content layer error types

use thiserror::Error;

use crate::address::ContentHash;

/// Errors from content verification and version resolution
#[derive(Debug, Error)]
pub enum ContentError {
    /// The fetched entry's canonical hash differs from the recorded
    /// expectation: corrupted or tampered content. Always fatal to the
    /// fetch; callers must treat it as total unavailability and never
    /// fall back to the unverified copy.
    #[error("Hash mismatch: corrupted or tampered content (expected {expected}, got {actual})")]
    HashMismatch {
        expected: ContentHash,
        actual: ContentHash,
    },

    /// The underlying fetch failed before any verification could run.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// `latest` was asked of an empty set of versioned entries.
    #[error("No versions available")]
    NoVersionsAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_mismatch_display_names_both_hashes() {
        let err = ContentError::HashMismatch {
            expected: ContentHash::new([0xaa; 32]),
            actual: ContentHash::new([0xbb; 32]),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("aaaaaaaa"));
        assert!(msg.contains("bbbbbbbb"));
        assert!(msg.contains("corrupted or tampered"));
    }

    #[test]
    fn test_no_versions_display() {
        assert!(format!("{}", ContentError::NoVersionsAvailable).contains("No versions"));
    }
}

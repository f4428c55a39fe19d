//! Content verification
//!
//! Defends against an untrusted host returning a different but
//! otherwise well-formed entry for the same address: fetched bytes are
//! hashed and held against the expectation recorded by the original
//! referencer before anything is returned to the caller.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use crate::address::{ContentRef, EntryAddress, canonical_hash};
use crate::error::ContentError;

/// Fetches raw entry bytes by address.
///
/// Implemented over whatever retrieval path is in play (a direct module
/// call, a raced remote call, a local cache). The verifier treats the
/// returned bytes as untrusted input.
#[async_trait]
pub trait EntryFetcher: Send + Sync {
    async fn fetch(&self, address: &EntryAddress) -> Result<Bytes, ContentError>;
}

#[async_trait]
impl<F, Fut> EntryFetcher for F
where
    F: Fn(EntryAddress) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Bytes, ContentError>> + Send,
{
    async fn fetch(&self, address: &EntryAddress) -> Result<Bytes, ContentError> {
        self(*address).await
    }
}

/// Fetch the referenced entry and verify it against its expected hash.
///
/// Equal hashes return the entry as trusted. A mismatch is
/// [`ContentError::HashMismatch`], fatal to this fetch: it must never be
/// downgraded to a warning, and callers treat it as total unavailability
/// of the content rather than returning partially-verified data.
pub async fn verify_and_fetch(
    content_ref: &ContentRef,
    fetcher: &dyn EntryFetcher,
) -> Result<Bytes, ContentError> {
    let entry = fetcher.fetch(&content_ref.address).await?;
    let actual = canonical_hash(&entry);

    if actual != content_ref.expected_hash {
        warn!(
            address = %content_ref.address,
            expected = %content_ref.expected_hash,
            actual = %actual,
            "Fetched entry failed content verification"
        );
        return Err(ContentError::HashMismatch {
            expected: content_ref.expected_hash,
            actual,
        });
    }

    Ok(entry)
}

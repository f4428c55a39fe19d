//! Directory error types

use thiserror::Error;

/// Errors raised by the host directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The instance alias has never been registered. Distinct from a
    /// known alias with zero hosts, which is a valid empty result.
    #[error("Unknown network instance alias: {0}")]
    UnknownAlias(String),
}

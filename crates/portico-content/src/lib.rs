//! # Portico Content
//!
//! Cross-host content trust: every remotely-fetched entry is untrusted
//! input until its canonical hash matches a locally-known expectation.
//! Registration of a host only establishes reachability and permission,
//! never content integrity.
//!
//! Also home to the version resolver, which orders the published
//! variants of a resource and deterministically picks "latest".

pub mod address;
pub mod error;
pub mod verify;
pub mod version;

pub use address::*;
pub use error::*;
pub use verify::*;
pub use version::*;

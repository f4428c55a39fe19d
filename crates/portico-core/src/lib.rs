//! # Portico Core
//!
//! Core types, errors, and the host transport seam for the Portico
//! marketplace layer.
//!
//! This crate provides the foundational abstractions shared by the host
//! directory, the portal (probe/select/invoke), and the content layer,
//! so that the same protocol logic works against both an in-memory mock
//! network (for testing) and a real transport.
//!
//! ## Key Types
//!
//! - [`PeerId`]: Opaque identity of a network participant
//! - [`InstanceId`]: Identifier of a shared network instance
//! - [`CallTarget`]: A (module, function) pair addressed by a remote call
//! - [`RemoteCall`]: A fully-addressed invocation with an opaque payload
//!
//! ## Key Traits
//!
//! - [`HostTransport`]: Probe/invoke seam implemented per transport

pub mod call;
pub mod error;
pub mod identity;
pub mod mock_host;
pub mod transport;

// Re-export main types
pub use call::*;
pub use error::*;
pub use identity::*;
pub use mock_host::*;
pub use transport::*;

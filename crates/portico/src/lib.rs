//! # Portico
//!
//! Client-facing layer of a peer-hosted application marketplace:
//! discover which peers currently offer a capability, race the live
//! ones, invoke the winner under its capability grant, and verify that
//! returned content is exactly what was originally published.
//!
//! [`Portal`] wires the lower crates together behind one surface:
//!
//! - host registration and capability lookup ([`portico_directory`])
//! - liveness probing and race-based selection ([`portico_portal`])
//! - content-address verification and version resolution
//!   ([`portico_content`])
//! - group-scoped moderation overlay ([`portico_moderation`])
//!
//! ```rust,ignore
//! use portico::{Portal, PortalConfig, RemoteCallRequest};
//!
//! let portal = Portal::new(local_peer, transport, PortalConfig::default());
//! portal.add_instance("devhub", instance_id);
//! portal.register_host("devhub", CapabilityGrant::Unrestricted)?;
//!
//! let response = portal.remote_call(RemoteCallRequest {
//!     alias: "devhub".into(),
//!     target: ("library", "get_entry").into(),
//!     payload,
//!     secret: None,
//!     timeout: None,
//! }).await?;
//! ```

pub mod error;
pub mod portal;

pub use error::{PorticoError, Result};
pub use portal::*;

// Re-export the main types of the lower layers.
pub use portico_content::{
    ContentError, ContentHash, ContentRef, EntryAddress, EntryFetcher, VersionedEntry,
    canonical_hash,
};
pub use portico_core::{
    CallTarget, HostTransport, InstanceId, MockHostBehavior, MockHostNet, PeerId, RemoteCall,
};
pub use portico_directory::{CapabilityGrant, DirectoryError, HostDirectory, HostRecord};
pub use portico_moderation::{
    Group, GroupId, ModeratedState, ModerationAction, ModerationError, ModerationOverlay,
    SubjectId,
};
pub use portico_portal::{
    Gateway, GatewayError, ProbeConfig, ProbeError, Prober, SelectConfig, SelectError,
};

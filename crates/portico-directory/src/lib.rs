//! # Portico Directory
//!
//! Per-instance registry of peers that have advertised a capability,
//! plus the capability grant model evaluated at call time.
//!
//! Registration establishes reachability and permission only; it never
//! establishes content trust. Content returned by a registered host is
//! still verified against its content address by the content layer.
//!
//! ## Key Types
//!
//! - [`CapabilityGrant`]: What a registering host permits callers to invoke
//! - [`HostRecord`]: A peer's active registration for one instance
//! - [`HostDirectory`]: Alias-keyed registry with capability filtering

pub mod directory;
pub mod error;
pub mod grant;
pub mod record;

pub use directory::*;
pub use error::*;
pub use grant::*;
pub use record::*;

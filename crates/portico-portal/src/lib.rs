//! # Portico Portal
//!
//! The call path of the marketplace layer: liveness probing, race-based
//! host selection, and capability-checked remote invocation.
//!
//! A consumer asks the [host directory](portico_directory) for peers
//! advertising a capability, races them with [`select_and_call`], and
//! the winning host's call goes through the [`Gateway`], which enforces
//! the registration and grant checks before any host logic runs.
//!
//! Retry policy lives here and nowhere else: the gateway never retries;
//! the selector "retries" only by racing other candidates; once all
//! candidates are exhausted the call is terminal.

pub mod error;
pub mod gateway;
pub mod probe;
pub mod select;

pub use error::*;
pub use gateway::*;
pub use probe::*;
pub use select::*;

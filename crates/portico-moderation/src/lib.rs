//! # Portico Moderation
//!
//! Per-group mutable visibility state layered non-destructively over a
//! base listing. Moderation is an append-only log of state transitions
//! per (group, subject); "current" is derived as the last element, which
//! sidesteps lost-update races and gives audit history for free. The
//! base listing itself is never touched.

pub mod error;
pub mod group;
pub mod overlay;
pub mod state;

pub use error::*;
pub use group::*;
pub use overlay::*;
pub use state::*;

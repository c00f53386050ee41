//! Domain layer containing the snapshot model and its codec.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (errors, value paths, timestamps)
//! - `value` - Self-describing value and its JSON codec
//! - `context` - Tracked domain state (consent, view, user, network)
//! - `snapshot` - Wire-stable snapshot aggregate and per-slot bridges

pub mod context;
pub mod foundation;
pub mod snapshot;
pub mod value;

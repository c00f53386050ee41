//! Application layer - snapshot services.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The tracker is the single writer on the live path. On restart the reader
//! takes the previous snapshot before the tracker starts writing.

mod context_tracker;
mod crash_context_reader;
mod snapshot;

pub use context_tracker::{ContextTracker, PersistOutcome};
pub use crash_context_reader::CrashContextReader;
pub use snapshot::{build_snapshot, build_state_snapshot, restore_snapshot};

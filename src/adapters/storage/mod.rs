//! Storage Adapters
//!
//! Implementations of the ContextStore port for persisting snapshots.
//!
//! ## Available Adapters
//!
//! - **FileContextStore** - Stores the snapshot as a JSON file, replaced atomically
//! - **InMemoryContextStore** - Stores the snapshot in memory (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileContextStore, InMemoryContextStore};
//!
//! // Production: file-based storage
//! let store = FileContextStore::new("./data/crash-context", "last-context.json");
//!
//! // Testing: in-memory storage
//! let store = InMemoryContextStore::new();
//! ```

mod file_context_store;
mod in_memory_context_store;

pub use file_context_store::FileContextStore;
pub use in_memory_context_store::InMemoryContextStore;

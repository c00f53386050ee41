//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - ContextStore implementations (file, in-memory)

pub mod storage;

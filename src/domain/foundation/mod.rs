//! Foundation module - Shared domain primitives.
//!
//! Contains the error kinds, value paths and timestamps that the codec,
//! snapshot and application layers share.

mod errors;
mod path;
mod timestamp;

pub use errors::CodecError;
pub use path::{PathSegment, ValuePath};
pub use timestamp::Timestamp;

//! Error types for the codec and snapshot layers.

use std::fmt;
use thiserror::Error;

use super::ValuePath;

/// Errors raised while encoding or decoding values and snapshots.
///
/// Every decode-side variant is recoverable: a caller on the restart path
/// treats any of them as "no prior context available".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A caller-supplied value has no self-describing representation.
    #[error("value at '{path}' is not serializable: {reason}")]
    ValueNotSerializable { path: ValuePath, reason: String },

    /// Wire content matches none of the self-describing variants.
    #[error("unrecognized value shape at '{path}': found {found}")]
    UnrecognizedValueShape { path: ValuePath, found: String },

    /// An enum integer outside the known range.
    #[error("unknown enum value at '{path}': {value}")]
    UnknownEnumValue { path: ValuePath, value: String },

    /// Bytes are not a complete JSON document (e.g. truncated mid-write).
    #[error("malformed wire format: {0}")]
    MalformedWireFormat(String),

    /// A typed field is present but holds the wrong JSON type.
    #[error("schema mismatch at '{path}': expected {expected}")]
    SchemaMismatch { path: ValuePath, expected: String },
}

impl CodecError {
    /// Creates a not-serializable error.
    pub fn not_serializable(path: ValuePath, reason: impl Into<String>) -> Self {
        CodecError::ValueNotSerializable {
            path,
            reason: reason.into(),
        }
    }

    /// Creates an unrecognized shape error.
    pub fn unrecognized(path: ValuePath, found: impl Into<String>) -> Self {
        CodecError::UnrecognizedValueShape {
            path,
            found: found.into(),
        }
    }

    /// Creates an unknown enum error.
    pub fn unknown_enum(path: ValuePath, value: impl fmt::Display) -> Self {
        CodecError::UnknownEnumValue {
            path,
            value: value.to_string(),
        }
    }

    /// Creates a schema mismatch error.
    pub fn schema_mismatch(path: ValuePath, expected: impl Into<String>) -> Self {
        CodecError::SchemaMismatch {
            path,
            expected: expected.into(),
        }
    }
}

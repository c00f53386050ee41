//! AnyValue - closed tagged union over every JSON-compatible shape.

use serde::ser::{Error as _, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::capture;
use crate::domain::foundation::{CodecError, ValuePath};

/// A self-describing value.
///
/// There is deliberately no null variant: absence is expressed by leaving a
/// key out of a mapping. Mappings are ordered by key so that encoding is
/// stable across runs.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<AnyValue>),
    Mapping(BTreeMap<String, AnyValue>),
}

/// Discriminant of an [`AnyValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Unsigned,
    Signed,
    Float,
    Text,
    Sequence,
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Bool => "bool",
            ValueKind::Unsigned => "unsigned",
            ValueKind::Signed => "signed",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        };
        write!(f, "{}", s)
    }
}

impl AnyValue {
    /// Walks any serde-serializable value into an `AnyValue`.
    ///
    /// The walk happens immediately. Values with no self-describing
    /// representation (a top-level `None`, non-finite floats, non-string map
    /// keys) fail with [`CodecError::ValueNotSerializable`]. `None` struct
    /// fields and map values are omitted.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, CodecError> {
        capture::capture(value)
    }

    /// Returns the variant of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            AnyValue::Bool(_) => ValueKind::Bool,
            AnyValue::Unsigned(_) => ValueKind::Unsigned,
            AnyValue::Signed(_) => ValueKind::Signed,
            AnyValue::Float(_) => ValueKind::Float,
            AnyValue::Text(_) => ValueKind::Text,
            AnyValue::Sequence(_) => ValueKind::Sequence,
            AnyValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an `i128` if it is an integer of either sign.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            AnyValue::Unsigned(u) => Some(i128::from(*u)),
            AnyValue::Signed(i) => Some(i128::from(*i)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[AnyValue]> {
        match self {
            AnyValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, AnyValue>> {
        match self {
            AnyValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Checks that the value can be written to the wire.
    ///
    /// The only variant that can be constructed but not encoded is a
    /// non-finite `Float`; the error names the first such location.
    pub fn validate(&self, path: &ValuePath) -> Result<(), CodecError> {
        match self {
            AnyValue::Float(f) if !f.is_finite() => Err(CodecError::not_serializable(
                path.clone(),
                format!("non-finite float {}", f),
            )),
            AnyValue::Sequence(items) => items
                .iter()
                .enumerate()
                .try_for_each(|(i, item)| item.validate(&path.index(i))),
            AnyValue::Mapping(map) => map
                .iter()
                .try_for_each(|(key, item)| item.validate(&path.key(key.as_str()))),
            _ => Ok(()),
        }
    }
}

impl Serialize for AnyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnyValue::Bool(b) => serializer.serialize_bool(*b),
            AnyValue::Unsigned(u) => serializer.serialize_u64(*u),
            AnyValue::Signed(i) => serializer.serialize_i64(*i),
            // serde_json would silently write `null` here
            AnyValue::Float(f) if !f.is_finite() => {
                Err(S::Error::custom(format!("non-finite float {}", f)))
            }
            AnyValue::Float(f) => serializer.serialize_f64(*f),
            AnyValue::Text(s) => serializer.serialize_str(s),
            AnyValue::Sequence(items) => serializer.collect_seq(items),
            AnyValue::Mapping(map) => serializer.collect_map(map),
        }
    }
}

impl From<bool> for AnyValue {
    fn from(v: bool) -> Self {
        AnyValue::Bool(v)
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for AnyValue {
            fn from(v: $t) -> Self {
                AnyValue::Unsigned(u64::from(v))
            }
        })*
    };
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for AnyValue {
            fn from(v: $t) -> Self {
                let v = i64::from(v);
                if v >= 0 {
                    AnyValue::Unsigned(v as u64)
                } else {
                    AnyValue::Signed(v)
                }
            }
        })*
    };
}

from_unsigned!(u8, u16, u32, u64);
from_signed!(i8, i16, i32, i64);

impl From<f64> for AnyValue {
    fn from(v: f64) -> Self {
        AnyValue::Float(v)
    }
}

impl From<&str> for AnyValue {
    fn from(v: &str) -> Self {
        AnyValue::Text(v.to_string())
    }
}

impl From<String> for AnyValue {
    fn from(v: String) -> Self {
        AnyValue::Text(v)
    }
}

impl From<Vec<AnyValue>> for AnyValue {
    fn from(v: Vec<AnyValue>) -> Self {
        AnyValue::Sequence(v)
    }
}

impl From<BTreeMap<String, AnyValue>> for AnyValue {
    fn from(v: BTreeMap<String, AnyValue>) -> Self {
        AnyValue::Mapping(v)
    }
}

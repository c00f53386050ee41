//! Value codec - JSON wire form of [`AnyValue`].
//!
//! JSON does not distinguish integer subtypes from floats syntactically, so
//! decoding runs an ordered type probe: each interpretation is tried in a
//! fixed priority order and the first one that applies without loss wins.
//!
//! 1. bool
//! 2. unsigned integer
//! 3. signed integer
//! 4. float
//! 5. text
//! 6. sequence
//! 7. mapping
//!
//! The guarantee is a weak round trip: `decode(encode(v))` may change an
//! integer's sign class, but `encode(decode(encode(v))) == encode(v)`.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use super::AnyValue;
use crate::domain::foundation::{CodecError, ValuePath};

type Probe = fn(&JsonValue, &ValuePath) -> Option<Result<AnyValue, CodecError>>;

/// Probe order. Booleans never become 0/1 and integers never become floats.
const PROBES: [Probe; 7] = [
    probe_bool,
    probe_unsigned,
    probe_signed,
    probe_float,
    probe_text,
    probe_sequence,
    probe_mapping,
];

/// Encodes a single value to JSON bytes.
///
/// Either the full buffer is returned or an error; no partial output.
pub fn encode_value(value: &AnyValue) -> Result<Vec<u8>, CodecError> {
    value.validate(&ValuePath::root())?;
    serde_json::to_vec(value)
        .map_err(|e| CodecError::not_serializable(ValuePath::root(), e.to_string()))
}

/// Decodes a single value from JSON bytes.
pub fn decode_value(bytes: &[u8]) -> Result<AnyValue, CodecError> {
    let json = parse_json(bytes)?;
    decode_json(&json, &ValuePath::root())
}

/// Parses raw bytes into a JSON tree.
///
/// Syntax errors and truncation (a snapshot cut off mid-write) are reported
/// as [`CodecError::MalformedWireFormat`].
pub(crate) fn parse_json(bytes: &[u8]) -> Result<JsonValue, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::MalformedWireFormat(e.to_string()))
}

/// Runs the ordered type probe over an already-parsed JSON node.
pub(crate) fn decode_json(json: &JsonValue, path: &ValuePath) -> Result<AnyValue, CodecError> {
    PROBES
        .iter()
        .find_map(|probe| probe(json, path))
        .unwrap_or_else(|| Err(CodecError::unrecognized(path.clone(), describe(json))))
}

/// Short description of a JSON node for error messages.
pub(crate) fn describe(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn probe_bool(json: &JsonValue, _path: &ValuePath) -> Option<Result<AnyValue, CodecError>> {
    json.as_bool().map(|b| Ok(AnyValue::Bool(b)))
}

// `as_u64`/`as_i64` only succeed for integer literals; `7.0` stays a float.
fn probe_unsigned(json: &JsonValue, _path: &ValuePath) -> Option<Result<AnyValue, CodecError>> {
    json.as_u64().map(|u| Ok(AnyValue::Unsigned(u)))
}

fn probe_signed(json: &JsonValue, _path: &ValuePath) -> Option<Result<AnyValue, CodecError>> {
    json.as_i64().map(|i| Ok(AnyValue::Signed(i)))
}

fn probe_float(json: &JsonValue, _path: &ValuePath) -> Option<Result<AnyValue, CodecError>> {
    json.as_f64().map(|f| Ok(AnyValue::Float(f)))
}

fn probe_text(json: &JsonValue, _path: &ValuePath) -> Option<Result<AnyValue, CodecError>> {
    json.as_str().map(|s| Ok(AnyValue::Text(s.to_string())))
}

fn probe_sequence(json: &JsonValue, path: &ValuePath) -> Option<Result<AnyValue, CodecError>> {
    json.as_array().map(|items| {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_json(item, &path.index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(AnyValue::Sequence)
    })
}

fn probe_mapping(json: &JsonValue, path: &ValuePath) -> Option<Result<AnyValue, CodecError>> {
    json.as_object().map(|object| {
        object
            .iter()
            .map(|(key, item)| {
                decode_json(item, &path.key(key.as_str())).map(|value| (key.clone(), value))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(AnyValue::Mapping)
    })
}

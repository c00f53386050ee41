//! Caller-supplied attributes and the policy applied when one cannot be encoded.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::warn;

use super::codec::{decode_json, describe};
use super::AnyValue;
use crate::domain::foundation::{CodecError, ValuePath};

/// Attributes keyed by name, ordered for stable output.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Type-erased attribute value handed in by a caller.
///
/// The value is walked into an [`AnyValue`] as soon as it is created. A walk
/// that fails is kept alongside the failure and only surfaces when the
/// snapshot holding it is encoded, where [`AttributePolicy`] decides the
/// outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValue(Captured);

#[derive(Debug, Clone, PartialEq)]
enum Captured {
    Value(AnyValue),
    Unserializable { at: ValuePath, reason: String },
}

impl AttributeValue {
    /// Captures any serde-serializable value.
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Self {
        match AnyValue::from_serializable(value) {
            Ok(captured) => Self(Captured::Value(captured)),
            Err(err) => Self::from_error(err),
        }
    }

    fn from_error(err: CodecError) -> Self {
        let (at, reason) = match err {
            CodecError::ValueNotSerializable { path, reason } => (path, reason),
            other => (ValuePath::root(), other.to_string()),
        };
        Self(Captured::Unserializable { at, reason })
    }

    /// Returns the captured value, or `None` if capture failed.
    pub fn value(&self) -> Option<&AnyValue> {
        match &self.0 {
            Captured::Value(value) => Some(value),
            Captured::Unserializable { .. } => None,
        }
    }

    pub fn is_serializable(&self) -> bool {
        matches!(self.0, Captured::Value(_))
    }

    /// Returns the value for encoding at `path`, or the capture failure
    /// re-rooted under `path`.
    pub fn resolve(&self, path: &ValuePath) -> Result<&AnyValue, CodecError> {
        match &self.0 {
            Captured::Value(value) => Ok(value),
            Captured::Unserializable { at, reason } => {
                Err(CodecError::not_serializable(path.join(at), reason.clone()))
            }
        }
    }
}

impl From<AnyValue> for AttributeValue {
    fn from(value: AnyValue) -> Self {
        match value.validate(&ValuePath::root()) {
            Ok(()) => Self(Captured::Value(value)),
            Err(err) => Self::from_error(err),
        }
    }
}

macro_rules! attribute_from {
    ($($t:ty),*) => {
        $(impl From<$t> for AttributeValue {
            fn from(v: $t) -> Self {
                AttributeValue::from(AnyValue::from(v))
            }
        })*
    };
}

attribute_from!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f64, &str, String);

/// What to do with an attribute that cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributePolicy {
    /// Skip the attribute, log it, and keep the rest of the snapshot.
    #[default]
    DropInvalid,
    /// Fail the whole snapshot.
    FailSnapshot,
}

/// Wraps decoded values back into caller-facing attributes.
pub fn into_attribute_map(values: BTreeMap<String, AnyValue>) -> AttributeMap {
    values
        .into_iter()
        .map(|(key, value)| (key, AttributeValue::from(value)))
        .collect()
}

/// Resolves every attribute for encoding under `path`.
pub fn encode_attributes(
    attributes: &AttributeMap,
    policy: AttributePolicy,
    path: &ValuePath,
) -> Result<BTreeMap<String, AnyValue>, CodecError> {
    let mut encoded = BTreeMap::new();
    for (key, attribute) in attributes {
        match attribute.resolve(&path.key(key.as_str())) {
            Ok(value) => {
                encoded.insert(key.clone(), value.clone());
            }
            Err(err) => match policy {
                AttributePolicy::DropInvalid => {
                    warn!(attribute = %key, error = %err, "Dropping unserializable attribute");
                }
                AttributePolicy::FailSnapshot => return Err(err),
            },
        }
    }
    Ok(encoded)
}

/// Decodes an attribute mapping through the ordered type probe.
pub fn decode_attributes(
    json: &JsonValue,
    path: &ValuePath,
) -> Result<BTreeMap<String, AnyValue>, CodecError> {
    let mismatch = |found: &str| {
        CodecError::schema_mismatch(path.clone(), format!("object, found {}", found))
    };
    if !json.is_object() {
        return Err(mismatch(describe(json)));
    }

    match decode_json(json, path)? {
        AnyValue::Mapping(entries) => Ok(entries),
        other => Err(mismatch(&other.kind().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes() -> AttributeMap {
        let mut map = AttributeMap::new();
        map.insert("plan".to_string(), AttributeValue::from("pro"));
        map.insert("ratio".to_string(), AttributeValue::from(f64::NAN));
        map.insert("seats".to_string(), AttributeValue::from(3u32));
        map
    }

    #[test]
    fn new_captures_serializable_values() {
        let attribute = AttributeValue::new(&vec![1u8, 2]);
        assert!(attribute.is_serializable());
        assert_eq!(
            attribute.value(),
            Some(&AnyValue::Sequence(vec![AnyValue::Unsigned(1), AnyValue::Unsigned(2)]))
        );
    }

    #[test]
    fn new_keeps_capture_failure() {
        let attribute = AttributeValue::new(&Option::<String>::None);
        assert!(!attribute.is_serializable());
        assert_eq!(attribute.value(), None);
    }

    #[test]
    fn resolve_reroots_failure_path() {
        let attribute = AttributeValue::new(&vec![0.5, f64::INFINITY]);
        let err = attribute
            .resolve(&ValuePath::root().key("lui").key("ei").key("scores"))
            .unwrap_err();
        match err {
            CodecError::ValueNotSerializable { path, .. } => {
                assert_eq!(path.to_string(), "/lui/ei/scores/1")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn drop_policy_skips_invalid_attribute() {
        let encoded =
            encode_attributes(&attributes(), AttributePolicy::DropInvalid, &ValuePath::root())
                .unwrap();
        assert_eq!(encoded.len(), 2);
        assert!(!encoded.contains_key("ratio"));
        assert_eq!(encoded["plan"], AnyValue::from("pro"));
    }

    #[test]
    fn fail_policy_rejects_whole_mapping() {
        let err = encode_attributes(
            &attributes(),
            AttributePolicy::FailSnapshot,
            &ValuePath::root().key("uia"),
        )
        .unwrap_err();
        match err {
            CodecError::ValueNotSerializable { path, .. } => {
                assert_eq!(path.to_string(), "/uia/ratio")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn decode_rejects_non_object() {
        let err = decode_attributes(&json!([1]), &ValuePath::root().key("att")).unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { .. }));
    }

    #[test]
    fn decode_resolves_each_entry_kind() {
        let decoded = decode_attributes(&json!({"n": 7, "t": "x"}), &ValuePath::root()).unwrap();
        assert_eq!(decoded["n"], AnyValue::Unsigned(7));
        assert_eq!(decoded["t"], AnyValue::from("x"));

        let attributes = into_attribute_map(decoded);
        assert!(attributes.values().all(AttributeValue::is_serializable));
    }

    #[test]
    fn policy_defaults_to_drop_invalid() {
        assert_eq!(AttributePolicy::default(), AttributePolicy::DropInvalid);
        let parsed: AttributePolicy = serde_json::from_str("\"fail_snapshot\"").unwrap();
        assert_eq!(parsed, AttributePolicy::FailSnapshot);
    }
}

//! Tri-state wire fields and JSON reading helpers shared by the bridges.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::domain::foundation::{CodecError, ValuePath};
use crate::domain::value::describe;

/// An optional wire field that remembers whether its key was present.
///
/// `Absent` is omitted on encode (pair with
/// `skip_serializing_if = "WireField::is_absent"`), `Null` is written as
/// `null`, and `Present` writes the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireField<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> WireField<T> {
    /// `None` maps to `Absent`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(WireField::Absent, WireField::Present)
    }

    /// Collapses `Absent` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            WireField::Present(value) => Some(value),
            WireField::Absent | WireField::Null => None,
        }
    }

    pub fn as_ref(&self) -> WireField<&T> {
        match self {
            WireField::Absent => WireField::Absent,
            WireField::Null => WireField::Null,
            WireField::Present(value) => WireField::Present(value),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, WireField::Absent)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, WireField::Present(_))
    }

    /// Converts the present value, keeping the absent/null distinction.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<WireField<U>, E> {
        Ok(match self {
            WireField::Absent => WireField::Absent,
            WireField::Null => WireField::Null,
            WireField::Present(value) => WireField::Present(f(value)?),
        })
    }
}

impl<T: Serialize> Serialize for WireField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WireField::Present(value) => value.serialize(serializer),
            // Absent is normally skipped by the container
            WireField::Absent | WireField::Null => serializer.serialize_none(),
        }
    }
}

/// Reads `key` from a JSON object as a tri-state field.
pub(crate) fn read_field<'a>(
    object: &'a Map<String, JsonValue>,
    key: &str,
) -> WireField<&'a JsonValue> {
    match object.get(key) {
        None => WireField::Absent,
        Some(JsonValue::Null) => WireField::Null,
        Some(value) => WireField::Present(value),
    }
}

pub(crate) fn expect_object<'a>(
    json: &'a JsonValue,
    path: &ValuePath,
) -> Result<&'a Map<String, JsonValue>, CodecError> {
    json.as_object()
        .ok_or_else(|| mismatch(path, "object", json))
}

pub(crate) fn expect_bool(json: &JsonValue, path: &ValuePath) -> Result<bool, CodecError> {
    json.as_bool().ok_or_else(|| mismatch(path, "bool", json))
}

pub(crate) fn expect_string(json: &JsonValue, path: &ValuePath) -> Result<String, CodecError> {
    json.as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(path, "string", json))
}

/// Reads an enum discriminant. Numbers that are not small non-negative
/// integers are unknown enum values; non-numbers are schema mismatches.
pub(crate) fn expect_enum_code(json: &JsonValue, path: &ValuePath) -> Result<u64, CodecError> {
    match json {
        JsonValue::Number(number) => number
            .as_u64()
            .ok_or_else(|| CodecError::unknown_enum(path.clone(), number)),
        other => Err(mismatch(path, "integer enum", other)),
    }
}

pub(crate) fn mismatch(path: &ValuePath, expected: &str, found: &JsonValue) -> CodecError {
    CodecError::schema_mismatch(
        path.clone(),
        format!("{}, found {}", expected, describe(found)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Flags {
        #[serde(skip_serializing_if = "WireField::is_absent")]
        a: WireField<bool>,
        #[serde(skip_serializing_if = "WireField::is_absent")]
        b: WireField<bool>,
        #[serde(skip_serializing_if = "WireField::is_absent")]
        c: WireField<bool>,
    }

    #[test]
    fn serializes_three_states_distinctly() {
        let flags = Flags {
            a: WireField::Absent,
            b: WireField::Null,
            c: WireField::Present(false),
        };
        assert_eq!(serde_json::to_string(&flags).unwrap(), r#"{"b":null,"c":false}"#);
    }

    #[test]
    fn read_field_distinguishes_missing_from_null() {
        let object = json!({"n": null, "v": 1});
        let object = object.as_object().unwrap();
        assert!(read_field(object, "missing").is_absent());
        assert_eq!(read_field(object, "n"), WireField::Null);
        assert!(read_field(object, "v").is_present());
    }

    #[test]
    fn option_conversions() {
        assert!(WireField::<u8>::from_option(None).is_absent());
        assert_eq!(WireField::<u8>::Null.into_option(), None);
        assert_eq!(WireField::Present(3).into_option(), Some(3));
    }

    #[test]
    fn enum_code_classifies_errors() {
        let path = ValuePath::root().key("ctc");
        assert_eq!(expect_enum_code(&json!(2), &path).unwrap(), 2);
        assert!(matches!(
            expect_enum_code(&json!(-1), &path),
            Err(CodecError::UnknownEnumValue { .. })
        ));
        assert!(matches!(
            expect_enum_code(&json!("granted"), &path),
            Err(CodecError::SchemaMismatch { .. })
        ));
    }
}

//! Serde serializer that walks caller values into [`AnyValue`].
//!
//! The walk produces `Option<AnyValue>` internally, where `None` stands for a
//! serialized null. Nulls inside mappings and structs drop their key; nulls at
//! the top level or inside sequences cannot be represented and fail.

use serde::ser::{self, Impossible, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::AnyValue;
use crate::domain::foundation::{CodecError, ValuePath};

const NULL_REASON: &str = "null has no self-describing representation";

/// Failure raised while walking a value.
///
/// `path` is `None` for errors raised through [`ser::Error::custom`] by a
/// value's own `Serialize` impl; the enclosing element fills it in.
#[derive(Debug)]
pub(crate) struct CaptureError {
    path: Option<ValuePath>,
    reason: String,
}

impl CaptureError {
    fn unsupported(path: &ValuePath, reason: impl Into<String>) -> Self {
        Self {
            path: Some(path.clone()),
            reason: reason.into(),
        }
    }

    fn at(mut self, path: &ValuePath) -> Self {
        if self.path.is_none() {
            self.path = Some(path.clone());
        }
        self
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for CaptureError {}

impl ser::Error for CaptureError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self {
            path: None,
            reason: msg.to_string(),
        }
    }
}

impl From<CaptureError> for CodecError {
    fn from(err: CaptureError) -> Self {
        CodecError::not_serializable(err.path.unwrap_or_default(), err.reason)
    }
}

/// Walks `value` into an `AnyValue`.
pub(crate) fn capture<T: Serialize + ?Sized>(value: &T) -> Result<AnyValue, CodecError> {
    let root = ValuePath::root();
    match value.serialize(ValueCapture { path: root.clone() }) {
        Ok(Some(captured)) => Ok(captured),
        Ok(None) => Err(CodecError::not_serializable(root, NULL_REASON)),
        Err(err) => Err(err.at(&root).into()),
    }
}

struct ValueCapture {
    path: ValuePath,
}

impl ValueCapture {
    fn nested<T: Serialize + ?Sized>(
        path: ValuePath,
        value: &T,
    ) -> Result<Option<AnyValue>, CaptureError> {
        value
            .serialize(ValueCapture { path: path.clone() })
            .map_err(|e| e.at(&path))
    }

    fn wrap_variant(variant: &'static str, payload: AnyValue) -> AnyValue {
        let mut map = BTreeMap::new();
        map.insert(variant.to_string(), payload);
        AnyValue::Mapping(map)
    }
}

impl ser::Serializer for ValueCapture {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    type SerializeSeq = CaptureSeq;
    type SerializeTuple = CaptureSeq;
    type SerializeTupleStruct = CaptureSeq;
    type SerializeTupleVariant = CaptureTupleVariant;
    type SerializeMap = CaptureMap;
    type SerializeStruct = CaptureMap;
    type SerializeStructVariant = CaptureStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::from(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok, Self::Error> {
        if let Ok(u) = u64::try_from(v) {
            Ok(Some(AnyValue::Unsigned(u)))
        } else if let Ok(i) = i64::try_from(v) {
            Ok(Some(AnyValue::Signed(i)))
        } else {
            Err(CaptureError::unsupported(
                &self.path,
                format!("integer {} exceeds 64 bits", v),
            ))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Unsigned(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok, Self::Error> {
        u64::try_from(v)
            .map(|u| Some(AnyValue::Unsigned(u)))
            .map_err(|_| {
                CaptureError::unsupported(&self.path, format!("integer {} exceeds 64 bits", v))
            })
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        if v.is_finite() {
            Ok(Some(AnyValue::Float(v)))
        } else {
            Err(CaptureError::unsupported(
                &self.path,
                format!("non-finite float {}", v),
            ))
        }
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Text(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Text(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Sequence(
            v.iter().map(|b| AnyValue::Unsigned(u64::from(*b))).collect(),
        )))
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Text(variant.to_string())))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        let path = self.path.key(variant);
        let payload = Self::nested(path.clone(), value)?
            .ok_or_else(|| CaptureError::unsupported(&path, NULL_REASON))?;
        Ok(Some(Self::wrap_variant(variant, payload)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(CaptureSeq {
            path: self.path,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Ok(CaptureTupleVariant {
            variant,
            seq: CaptureSeq {
                path: self.path.key(variant),
                items: Vec::with_capacity(len),
            },
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(CaptureMap {
            path: self.path,
            entries: BTreeMap::new(),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(CaptureStructVariant {
            variant,
            map: CaptureMap {
                path: self.path.key(variant),
                entries: BTreeMap::new(),
                next_key: None,
            },
        })
    }
}

struct CaptureSeq {
    path: ValuePath,
    items: Vec<AnyValue>,
}

impl CaptureSeq {
    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), CaptureError> {
        let path = self.path.index(self.items.len());
        let item = ValueCapture::nested(path.clone(), value)?
            .ok_or_else(|| CaptureError::unsupported(&path, NULL_REASON))?;
        self.items.push(item);
        Ok(())
    }
}

impl ser::SerializeSeq for CaptureSeq {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Sequence(self.items)))
    }
}

impl ser::SerializeTuple for CaptureSeq {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Sequence(self.items)))
    }
}

impl ser::SerializeTupleStruct for CaptureSeq {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Sequence(self.items)))
    }
}

struct CaptureTupleVariant {
    variant: &'static str,
    seq: CaptureSeq,
}

impl ser::SerializeTupleVariant for CaptureTupleVariant {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        self.seq.push(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(ValueCapture::wrap_variant(
            self.variant,
            AnyValue::Sequence(self.seq.items),
        )))
    }
}

struct CaptureMap {
    path: ValuePath,
    entries: BTreeMap<String, AnyValue>,
    next_key: Option<String>,
}

impl CaptureMap {
    /// Keys are compared after conversion to text, so `1` and `"1"` collide.
    fn insert<T: Serialize + ?Sized>(
        &mut self,
        key: String,
        value: &T,
    ) -> Result<(), CaptureError> {
        if self.entries.contains_key(&key) {
            return Err(CaptureError::unsupported(
                &self.path,
                format!("duplicate mapping key '{}'", key),
            ));
        }
        let path = self.path.key(key.as_str());
        if let Some(item) = ValueCapture::nested(path, value)? {
            self.entries.insert(key, item);
        }
        Ok(())
    }
}

impl ser::SerializeMap for CaptureMap {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Self::Error> {
        let key = key.serialize(MapKeyCapture { path: &self.path })?;
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Self::Error> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| CaptureError::unsupported(&self.path, "map value without key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Mapping(self.entries)))
    }
}

impl ser::SerializeStruct for CaptureMap {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(AnyValue::Mapping(self.entries)))
    }
}

struct CaptureStructVariant {
    variant: &'static str,
    map: CaptureMap,
}

impl ser::SerializeStructVariant for CaptureStructVariant {
    type Ok = Option<AnyValue>;
    type Error = CaptureError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        self.map.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(Some(ValueCapture::wrap_variant(
            self.variant,
            AnyValue::Mapping(self.map.entries),
        )))
    }
}

/// Serializer for mapping keys: strings, chars, bools and integers are
/// rendered as text, everything else is rejected.
struct MapKeyCapture<'a> {
    path: &'a ValuePath,
}

impl MapKeyCapture<'_> {
    fn reject(&self) -> CaptureError {
        CaptureError::unsupported(self.path, "mapping keys must be strings")
    }
}

impl<'a> ser::Serializer for MapKeyCapture<'a> {
    type Ok = String;
    type Error = CaptureError;

    type SerializeSeq = Impossible<String, CaptureError>;
    type SerializeTuple = Impossible<String, CaptureError>;
    type SerializeTupleStruct = Impossible<String, CaptureError>;
    type SerializeTupleVariant = Impossible<String, CaptureError>;
    type SerializeMap = Impossible<String, CaptureError>;
    type SerializeStruct = Impossible<String, CaptureError>;
    type SerializeStructVariant = Impossible<String, CaptureError>;

    fn serialize_bool(self, v: bool) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String, CaptureError> {
        Err(self.reject())
    }

    fn serialize_f64(self, _v: f64) -> Result<String, CaptureError> {
        Err(self.reject())
    }

    fn serialize_char(self, v: char) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String, CaptureError> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, CaptureError> {
        Err(self.reject())
    }

    fn serialize_none(self) -> Result<String, CaptureError> {
        Err(self.reject())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String, CaptureError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, CaptureError> {
        Err(self.reject())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, CaptureError> {
        Err(self.reject())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, CaptureError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, CaptureError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, CaptureError> {
        Err(self.reject())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, CaptureError> {
        Err(self.reject())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, CaptureError> {
        Err(self.reject())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, CaptureError> {
        Err(self.reject())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, CaptureError> {
        Err(self.reject())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, CaptureError> {
        Err(self.reject())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, CaptureError> {
        Err(self.reject())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, CaptureError> {
        Err(self.reject())
    }
}

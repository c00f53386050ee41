//! Value module - self-describing values and their JSON codec.
//!
//! - `AnyValue` - closed tagged union over JSON-compatible shapes
//! - `AttributeValue` - type-erased caller attribute, captured on hand-off
//! - `encode_value` / `decode_value` - wire codec with the ordered type probe

mod any_value;
mod attribute;
mod capture;
mod codec;

pub use any_value::{AnyValue, ValueKind};
pub use attribute::{
    decode_attributes, encode_attributes, into_attribute_map, AttributeMap, AttributePolicy,
    AttributeValue,
};
pub use codec::{decode_value, encode_value};

pub(crate) use codec::{decode_json, describe, parse_json};

//! User-info bridge.
//!
//! Keys: `id`, `nm` name, `em` email, `ei` extra attributes.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use super::field::{expect_object, expect_string, read_field, WireField};
use crate::domain::context::UserInfo;
use crate::domain::foundation::{CodecError, ValuePath};
use crate::domain::value::{
    decode_attributes, encode_attributes, into_attribute_map, AnyValue, AttributePolicy,
};

/// Wire form of [`UserInfo`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfoWire {
    #[serde(rename = "id", skip_serializing_if = "WireField::is_absent")]
    pub id: WireField<String>,
    #[serde(rename = "nm", skip_serializing_if = "WireField::is_absent")]
    pub name: WireField<String>,
    #[serde(rename = "em", skip_serializing_if = "WireField::is_absent")]
    pub email: WireField<String>,
    #[serde(rename = "ei")]
    pub extra_info: BTreeMap<String, AnyValue>,
}

impl UserInfoWire {
    /// Copies `info` into wire form, resolving extra attributes under `path`.
    pub fn capture(
        info: &UserInfo,
        policy: AttributePolicy,
        path: &ValuePath,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            id: WireField::from_option(info.id.clone()),
            name: WireField::from_option(info.name.clone()),
            email: WireField::from_option(info.email.clone()),
            extra_info: encode_attributes(&info.extra_info, policy, &path.key("ei"))?,
        })
    }

    pub(crate) fn from_json(json: &JsonValue, path: &ValuePath) -> Result<Self, CodecError> {
        let object = expect_object(json, path)?;

        let text = |key: &str| {
            let field_path = path.key(key);
            read_field(object, key).try_map(|value| expect_string(value, &field_path))
        };

        let extra_path = path.key("ei");
        let extra_info = match read_field(object, "ei") {
            WireField::Present(value) => decode_attributes(value, &extra_path)?,
            WireField::Absent | WireField::Null => BTreeMap::new(),
        };

        Ok(Self {
            id: text("id")?,
            name: text("nm")?,
            email: text("em")?,
            extra_info,
        })
    }

    pub fn into_domain(self) -> UserInfo {
        UserInfo {
            id: self.id.into_option(),
            name: self.name.into_option(),
            email: self.email.into_option(),
            extra_info: into_attribute_map(self.extra_info),
        }
    }
}

//! View-event bridge.
//!
//! Keys: `mdl` event model (its own field names), `att` SDK attributes,
//! `uia` user attributes.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use super::field::{expect_object, read_field, WireField};
use crate::domain::context::{ViewEvent, ViewEventModel};
use crate::domain::foundation::{CodecError, ValuePath};
use crate::domain::value::{
    decode_attributes, encode_attributes, into_attribute_map, AnyValue, AttributePolicy,
};

/// Wire form of [`ViewEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEventWire {
    #[serde(rename = "mdl")]
    pub model: ViewEventModel,
    #[serde(rename = "att")]
    pub attributes: BTreeMap<String, AnyValue>,
    #[serde(rename = "uia")]
    pub user_attributes: BTreeMap<String, AnyValue>,
}

impl ViewEventWire {
    /// Copies `event` into wire form, resolving both attribute maps.
    pub fn capture(
        event: &ViewEvent,
        policy: AttributePolicy,
        path: &ValuePath,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            model: event.model.clone(),
            attributes: encode_attributes(&event.attributes, policy, &path.key("att"))?,
            user_attributes: encode_attributes(&event.user_attributes, policy, &path.key("uia"))?,
        })
    }

    pub(crate) fn from_json(json: &JsonValue, path: &ValuePath) -> Result<Self, CodecError> {
        let object = expect_object(json, path)?;

        let model_path = path.key("mdl");
        let model = match read_field(object, "mdl") {
            WireField::Present(value) => {
                ViewEventModel::deserialize(value).map_err(|e| {
                    CodecError::schema_mismatch(model_path, format!("view event model ({})", e))
                })?
            }
            _ => return Err(CodecError::schema_mismatch(model_path, "view event model")),
        };

        let decode_map = |key: &str| {
            let map_path = path.key(key);
            match read_field(object, key) {
                WireField::Present(value) => decode_attributes(value, &map_path),
                WireField::Absent | WireField::Null => Ok(BTreeMap::new()),
            }
        };

        Ok(Self {
            model,
            attributes: decode_map("att")?,
            user_attributes: decode_map("uia")?,
        })
    }

    pub fn into_domain(self) -> ViewEvent {
        ViewEvent {
            model: self.model,
            attributes: into_attribute_map(self.attributes),
            user_attributes: into_attribute_map(self.user_attributes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::{ApplicationRef, SessionKind, SessionRef, ViewDetails};
    use crate::domain::value::AttributeValue;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn path() -> ValuePath {
        ValuePath::root().key("lre")
    }

    fn event() -> ViewEvent {
        ViewEvent::new(ViewEventModel {
            date: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            application: ApplicationRef { id: Uuid::nil() },
            session: SessionRef {
                id: Uuid::nil(),
                kind: SessionKind::User,
            },
            view: ViewDetails {
                id: Uuid::nil(),
                name: Some("Home".to_string()),
                url: "app://home".to_string(),
                time_spent: 10,
                is_active: None,
                error_count: 0,
                action_count: 0,
            },
            service: None,
            version: None,
        })
        .with_attribute("_dd.view.kind", "screen")
        .with_user_attribute("tags", AttributeValue::new(&("a", 1u8, true)))
    }

    #[test]
    fn round_trips_model_and_both_maps() {
        let wire = ViewEventWire::capture(&event(), AttributePolicy::DropInvalid, &path()).unwrap();
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["mdl"]["view"]["name"], json!("Home"));
        assert_eq!(json["uia"]["tags"], json!(["a", 1, true]));

        let decoded = ViewEventWire::from_json(&json, &path()).unwrap().into_domain();
        assert_eq!(decoded, event());
    }

    #[test]
    fn malformed_model_is_schema_mismatch_at_mdl() {
        let input = json!({"mdl": {"date": "x"}, "att": {}, "uia": {}});
        let err = ViewEventWire::from_json(&input, &path()).unwrap_err();
        match err {
            CodecError::SchemaMismatch { path, .. } => assert_eq!(path.to_string(), "/lre/mdl"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_model_is_rejected() {
        let err = ViewEventWire::from_json(&json!({"att": {}}), &path()).unwrap_err();
        assert!(matches!(err, CodecError::SchemaMismatch { .. }));
    }

    #[test]
    fn null_inside_user_attribute_reports_path() {
        let mut json = serde_json::to_value(
            ViewEventWire::capture(&event(), AttributePolicy::DropInvalid, &path()).unwrap(),
        )
        .unwrap();
        json["uia"]["tags"] = json!([1, null]);

        let err = ViewEventWire::from_json(&json, &path()).unwrap_err();
        match err {
            CodecError::UnrecognizedValueShape { path, .. } => {
                assert_eq!(path.to_string(), "/lre/uia/tags/1")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

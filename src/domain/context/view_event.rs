//! Last view event tracked for the screen the user was on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value::{AttributeMap, AttributeValue};

/// A view event: the structural event model plus two attribute mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewEvent {
    pub model: ViewEventModel,
    /// Attributes set internally by the SDK.
    pub attributes: AttributeMap,
    /// Attributes supplied by the application.
    pub user_attributes: AttributeMap,
}

impl ViewEvent {
    /// Creates a view event with no attributes.
    pub fn new(model: ViewEventModel) -> Self {
        Self {
            model,
            attributes: AttributeMap::new(),
            user_attributes: AttributeMap::new(),
        }
    }

    /// Adds an SDK-internal attribute.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Adds a user-supplied attribute.
    pub fn with_user_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.user_attributes.insert(key.into(), value.into());
        self
    }
}

/// Structural fields of a view event, serialized with their own field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEventModel {
    /// Start of the view, Unix milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    pub application: ApplicationRef,
    pub session: SessionRef,
    pub view: ViewDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRef {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRef {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: SessionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[default]
    User,
    Synthetics,
    CiTest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDetails {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    /// Nanoseconds spent on the view so far.
    pub time_spent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub action_count: u64,
}

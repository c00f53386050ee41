//! ContextSnapshot - the persisted aggregate of tracked state.

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::field::{expect_bool, expect_object, read_field, WireField};
use super::{ConsentWire, NetworkInfoWire, UserInfoWire, ViewEventWire};
use crate::domain::context::{ContextState, NetworkInfo, TrackingConsent, UserInfo, ViewEvent};
use crate::domain::foundation::{CodecError, ValuePath};
use crate::domain::value::{parse_json, AttributePolicy};

/// Top-level snapshot keys. Never rename or reuse one of these; new slots
/// get a fresh key and must be optional.
pub mod keys {
    pub const TRACKING_CONSENT: &str = "ctc";
    pub const LAST_VIEW_EVENT: &str = "lre";
    pub const LAST_USER_INFO: &str = "lui";
    pub const LAST_NETWORK_INFO: &str = "lni";
    pub const LAST_IS_APP_IN_FOREGROUND: &str = "aif";
}

/// Versioned snapshot of the tracked application state.
///
/// Rebuilt from domain values on every mutation and encoded in one go.
/// Decoding ignores keys it does not know, so snapshots written by a newer
/// writer still restore.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSnapshot {
    #[serde(rename = "ctc")]
    pub tracking_consent: ConsentWire,
    #[serde(rename = "lre", skip_serializing_if = "WireField::is_absent")]
    pub last_view_event: WireField<ViewEventWire>,
    #[serde(rename = "lui", skip_serializing_if = "WireField::is_absent")]
    pub last_user_info: WireField<UserInfoWire>,
    #[serde(rename = "lni", skip_serializing_if = "WireField::is_absent")]
    pub last_network_info: WireField<NetworkInfoWire>,
    #[serde(rename = "aif", skip_serializing_if = "WireField::is_absent")]
    pub last_is_app_in_foreground: WireField<bool>,
}

impl ContextSnapshot {
    /// Creates a snapshot holding only the consent decision.
    pub fn new(consent: TrackingConsent) -> Self {
        Self {
            tracking_consent: consent.into(),
            last_view_event: WireField::Absent,
            last_user_info: WireField::Absent,
            last_network_info: WireField::Absent,
            last_is_app_in_foreground: WireField::Absent,
        }
    }

    pub fn with_view_event(
        mut self,
        event: &ViewEvent,
        policy: AttributePolicy,
    ) -> Result<Self, CodecError> {
        let path = ValuePath::root().key(keys::LAST_VIEW_EVENT);
        self.last_view_event = WireField::Present(ViewEventWire::capture(event, policy, &path)?);
        Ok(self)
    }

    pub fn with_user_info(
        mut self,
        info: &UserInfo,
        policy: AttributePolicy,
    ) -> Result<Self, CodecError> {
        let path = ValuePath::root().key(keys::LAST_USER_INFO);
        self.last_user_info = WireField::Present(UserInfoWire::capture(info, policy, &path)?);
        Ok(self)
    }

    pub fn with_network_info(mut self, info: &NetworkInfo) -> Self {
        self.last_network_info = WireField::Present(NetworkInfoWire::from(info));
        self
    }

    pub fn with_app_in_foreground(mut self, in_foreground: bool) -> Self {
        self.last_is_app_in_foreground = WireField::Present(in_foreground);
        self
    }

    /// Builds a snapshot from a full domain state.
    pub fn capture(state: &ContextState, policy: AttributePolicy) -> Result<Self, CodecError> {
        let mut snapshot = Self::new(state.tracking_consent);
        if let Some(event) = &state.last_view_event {
            snapshot = snapshot.with_view_event(event, policy)?;
        }
        if let Some(info) = &state.last_user_info {
            snapshot = snapshot.with_user_info(info, policy)?;
        }
        if let Some(info) = &state.last_network_info {
            snapshot = snapshot.with_network_info(info);
        }
        if let Some(in_foreground) = state.last_is_app_in_foreground {
            snapshot = snapshot.with_app_in_foreground(in_foreground);
        }
        Ok(snapshot)
    }

    /// Encodes the snapshot to JSON bytes.
    ///
    /// Returns the complete buffer or an error, never a partial buffer.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self)
            .map_err(|e| CodecError::not_serializable(ValuePath::root(), e.to_string()))
    }

    /// Decodes a snapshot from JSON bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let json = parse_json(bytes)?;
        Self::from_json(&json)
    }

    fn from_json(json: &JsonValue) -> Result<Self, CodecError> {
        let root = ValuePath::root();
        let object = expect_object(json, &root)?;

        let consent_path = root.key(keys::TRACKING_CONSENT);
        let tracking_consent = match read_field(object, keys::TRACKING_CONSENT) {
            WireField::Present(value) => ConsentWire::from_json(value, &consent_path)?,
            _ => return Err(CodecError::schema_mismatch(consent_path, "tracking consent code")),
        };

        let slot_path = |key: &str| root.key(key);

        Ok(Self {
            tracking_consent,
            last_view_event: read_field(object, keys::LAST_VIEW_EVENT).try_map(|value| {
                ViewEventWire::from_json(value, &slot_path(keys::LAST_VIEW_EVENT))
            })?,
            last_user_info: read_field(object, keys::LAST_USER_INFO).try_map(|value| {
                UserInfoWire::from_json(value, &slot_path(keys::LAST_USER_INFO))
            })?,
            last_network_info: read_field(object, keys::LAST_NETWORK_INFO).try_map(|value| {
                NetworkInfoWire::from_json(value, &slot_path(keys::LAST_NETWORK_INFO))
            })?,
            last_is_app_in_foreground: read_field(object, keys::LAST_IS_APP_IN_FOREGROUND)
                .try_map(|value| {
                    expect_bool(value, &slot_path(keys::LAST_IS_APP_IN_FOREGROUND))
                })?,
        })
    }

    /// Converts back to domain values. `null` slots restore as `None`.
    pub fn into_domain(self) -> ContextState {
        ContextState {
            tracking_consent: self.tracking_consent.into_domain(),
            last_view_event: self
                .last_view_event
                .into_option()
                .map(ViewEventWire::into_domain),
            last_user_info: self.last_user_info.into_option().map(UserInfoWire::into_domain),
            last_network_info: self
                .last_network_info
                .into_option()
                .map(NetworkInfoWire::into_domain),
            last_is_app_in_foreground: self.last_is_app_in_foreground.into_option(),
        }
    }
}

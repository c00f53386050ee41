//! Snapshot build and restore entry points.

use crate::domain::context::{ContextState, NetworkInfo, TrackingConsent, UserInfo, ViewEvent};
use crate::domain::foundation::CodecError;
use crate::domain::snapshot::ContextSnapshot;
use crate::domain::value::AttributePolicy;

/// Builds and encodes a snapshot from the individual tracked values.
///
/// Each value is copied into its wire form before encoding starts, so the
/// caller may keep mutating its own copies afterwards.
///
/// # Errors
/// `ValueNotSerializable` when an attribute cannot be encoded and `policy`
/// is [`AttributePolicy::FailSnapshot`]. No bytes are produced in that case.
pub fn build_snapshot(
    consent: TrackingConsent,
    view_event: Option<&ViewEvent>,
    user_info: Option<&UserInfo>,
    network_info: Option<&NetworkInfo>,
    policy: AttributePolicy,
) -> Result<Vec<u8>, CodecError> {
    let mut snapshot = ContextSnapshot::new(consent);
    if let Some(event) = view_event {
        snapshot = snapshot.with_view_event(event, policy)?;
    }
    if let Some(info) = user_info {
        snapshot = snapshot.with_user_info(info, policy)?;
    }
    if let Some(info) = network_info {
        snapshot = snapshot.with_network_info(info);
    }
    snapshot.encode()
}

/// Builds and encodes a snapshot of a full [`ContextState`].
pub fn build_state_snapshot(
    state: &ContextState,
    policy: AttributePolicy,
) -> Result<Vec<u8>, CodecError> {
    ContextSnapshot::capture(state, policy)?.encode()
}

/// Decodes snapshot bytes back into domain values.
///
/// # Errors
/// Any decode error. Callers on the restart path treat an error as
/// "no prior context".
pub fn restore_snapshot(bytes: &[u8]) -> Result<ContextState, CodecError> {
    Ok(ContextSnapshot::decode(bytes)?.into_domain())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::Reachability;
    use crate::domain::value::{AnyValue, AttributeValue};

    #[test]
    fn builds_consent_only_snapshot() {
        let bytes =
            build_snapshot(TrackingConsent::Pending, None, None, None, AttributePolicy::default())
                .unwrap();
        assert_eq!(bytes, br#"{"ctc":2}"#.to_vec());
    }

    #[test]
    fn restores_what_was_built() {
        let user = UserInfo::with_id("u1").extra("plan", "pro");
        let network = NetworkInfo::new(Reachability::Maybe);
        let bytes = build_snapshot(
            TrackingConsent::Granted,
            None,
            Some(&user),
            Some(&network),
            AttributePolicy::default(),
        )
        .unwrap();

        let state = restore_snapshot(&bytes).unwrap();

        assert_eq!(state.tracking_consent, TrackingConsent::Granted);
        assert!(state.last_view_event.is_none());
        assert_eq!(state.last_user_info, Some(user));
        assert_eq!(state.last_network_info, Some(network));
    }

    #[test]
    fn state_snapshot_includes_foreground_flag() {
        let mut state = ContextState::new(TrackingConsent::NotGranted);
        state.last_is_app_in_foreground = Some(true);

        let bytes = build_state_snapshot(&state, AttributePolicy::default()).unwrap();

        assert_eq!(bytes, br#"{"ctc":1,"aif":true}"#.to_vec());
        assert_eq!(restore_snapshot(&bytes).unwrap(), state);
    }

    #[test]
    fn policy_decides_fate_of_bad_attribute() {
        let bad = AttributeValue::from(AnyValue::Float(f64::NAN));
        let user = UserInfo::with_id("u1").extra("ratio", bad).extra("plan", "pro");

        let lenient = build_snapshot(
            TrackingConsent::Granted,
            None,
            Some(&user),
            None,
            AttributePolicy::DropInvalid,
        )
        .unwrap();
        let restored = restore_snapshot(&lenient).unwrap();
        let extra = restored.last_user_info.unwrap().extra_info;
        assert!(extra.contains_key("plan"));
        assert!(!extra.contains_key("ratio"));

        let strict = build_snapshot(
            TrackingConsent::Granted,
            None,
            Some(&user),
            None,
            AttributePolicy::FailSnapshot,
        );
        assert!(matches!(strict, Err(CodecError::ValueNotSerializable { .. })));
    }

    #[test]
    fn restore_reports_truncated_bytes() {
        let result = restore_snapshot(br#"{"ctc":0,"lui":{"id":"u"#);
        assert!(matches!(result, Err(CodecError::MalformedWireFormat(_))));
    }
}

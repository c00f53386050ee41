//! End-to-end checks of the value codec and the snapshot aggregate.

use std::collections::BTreeMap;

use crash_context::adapters::storage::InMemoryContextStore;
use crash_context::application::{build_snapshot, restore_snapshot, CrashContextReader};
use crash_context::domain::context::{TrackingConsent, UserInfo};
use crash_context::domain::foundation::CodecError;
use crash_context::domain::snapshot::ContextSnapshot;
use crash_context::domain::value::{
    decode_value, encode_value, AnyValue, AttributePolicy, ValueKind,
};
use proptest::prelude::*;

// =============================================================================
// Value codec
// =============================================================================

fn any_value() -> impl Strategy<Value = AnyValue> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(AnyValue::Bool),
        any::<u64>().prop_map(AnyValue::Unsigned),
        any::<i64>().prop_map(AnyValue::Signed),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(AnyValue::Float),
        ".{0,12}".prop_map(AnyValue::Text),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(AnyValue::Sequence),
            proptest::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(AnyValue::Mapping),
        ]
    })
}

/// Positive signed integers come back unsigned; everything else is kept.
fn normalized(value: &AnyValue) -> AnyValue {
    match value {
        AnyValue::Signed(n) if *n >= 0 => AnyValue::Unsigned(*n as u64),
        AnyValue::Sequence(items) => AnyValue::Sequence(items.iter().map(normalized).collect()),
        AnyValue::Mapping(entries) => AnyValue::Mapping(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), normalized(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn encoding_is_stable_across_a_decode(value in any_value()) {
        let first = encode_value(&value).unwrap();
        let decoded = decode_value(&first).unwrap();
        let second = encode_value(&decoded).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn decode_preserves_kind_up_to_integer_sign(value in any_value()) {
        let decoded = decode_value(&encode_value(&value).unwrap()).unwrap();
        prop_assert_eq!(decoded, normalized(&value));
    }
}

#[test]
fn each_kind_survives_a_round_trip() {
    let samples = [
        (AnyValue::Bool(false), ValueKind::Bool),
        (AnyValue::Unsigned(u64::MAX), ValueKind::Unsigned),
        (AnyValue::Signed(i64::MIN), ValueKind::Signed),
        (AnyValue::Float(7.0), ValueKind::Float),
        (AnyValue::from("x"), ValueKind::Text),
        (AnyValue::Sequence(vec![]), ValueKind::Sequence),
        (AnyValue::Mapping(BTreeMap::new()), ValueKind::Mapping),
    ];

    for (value, kind) in samples {
        let decoded = decode_value(&encode_value(&value).unwrap()).unwrap();
        assert_eq!(decoded.kind(), kind, "kind changed for {value:?}");
    }
}

#[test]
fn decode_prefers_the_narrowest_kind() {
    assert_eq!(decode_value(b"true").unwrap(), AnyValue::Bool(true));
    assert_eq!(decode_value(b"7").unwrap(), AnyValue::Unsigned(7));
    assert_eq!(decode_value(b"-3").unwrap(), AnyValue::Signed(-3));
    assert_eq!(decode_value(b"2.5").unwrap(), AnyValue::Float(2.5));
}

#[test]
fn mixed_sequence_keeps_each_element_kind() {
    let value = AnyValue::Mapping(BTreeMap::from([(
        "mixed".to_string(),
        AnyValue::Sequence(vec![
            AnyValue::Bool(true),
            AnyValue::Unsigned(1),
            AnyValue::from("x"),
        ]),
    )]));

    let bytes = encode_value(&value).unwrap();
    assert_eq!(bytes, br#"{"mixed":[true,1,"x"]}"#.to_vec());
    assert_eq!(decode_value(&bytes).unwrap(), value);
}

// =============================================================================
// Snapshot aggregate
// =============================================================================

#[test]
fn user_info_snapshot_round_trip() {
    let user = UserInfo::with_id("u1").extra("plan", "pro");
    let bytes = build_snapshot(
        TrackingConsent::Granted,
        None,
        Some(&user),
        None,
        AttributePolicy::default(),
    )
    .unwrap();

    let state = restore_snapshot(&bytes).unwrap();

    assert_eq!(state.tracking_consent, TrackingConsent::Granted);
    assert!(state.last_view_event.is_none());
    assert!(state.last_network_info.is_none());
    let user = state.last_user_info.unwrap();
    assert_eq!(user.id.as_deref(), Some("u1"));
    assert_eq!(user.name, None);
    assert_eq!(user.email, None);
    assert_eq!(
        user.extra_info.get("plan").and_then(|v| v.value()),
        Some(&AnyValue::Text("pro".to_string()))
    );
}

#[test]
fn unknown_consent_code_is_rejected() {
    let result = ContextSnapshot::decode(br#"{"ctc":99}"#);
    assert!(matches!(result, Err(CodecError::UnknownEnumValue { .. })));
}

#[test]
fn truncated_snapshot_means_no_prior_context() {
    let user = UserInfo::with_id("u1").name("Ada");
    let bytes = build_snapshot(
        TrackingConsent::Granted,
        None,
        Some(&user),
        None,
        AttributePolicy::default(),
    )
    .unwrap();
    let truncated = &bytes[..bytes.len() - 3];

    assert!(matches!(
        restore_snapshot(truncated),
        Err(CodecError::MalformedWireFormat(_))
    ));

    let reader =
        CrashContextReader::take_from(&InMemoryContextStore::with_snapshot(truncated)).unwrap();
    assert!(reader.restore_previous().is_none());
}

//! Property-based tests for encode/decode round-trips.

#![allow(clippy::expect_used)]

use bytes::{Bytes, BytesMut};
use proptest::prelude::*;

use super::{decode_value, encode_value};
use crate::types::{MapItemSeq, ThriftField, ThriftMapItem, ThriftType, ThriftValue, ValueSeq};

/// Strategy for a wire type; containers only appear while `depth` permits
/// recursion.
fn arb_type(depth: u32) -> BoxedStrategy<ThriftType> {
    let mut options = vec![
        ThriftType::Bool,
        ThriftType::Byte,
        ThriftType::Double,
        ThriftType::I16,
        ThriftType::I32,
        ThriftType::I64,
        ThriftType::Binary,
    ];
    if depth > 0 {
        options.extend([
            ThriftType::Struct,
            ThriftType::Map,
            ThriftType::Set,
            ThriftType::List,
        ]);
    }
    proptest::sample::select(options).boxed()
}

/// Strategy for a value of one specific wire type, so generated containers
/// stay homogeneous.
fn arb_value_of(ty: ThriftType, depth: u32) -> BoxedStrategy<ThriftValue> {
    match ty {
        ThriftType::Bool => any::<bool>().prop_map(ThriftValue::Bool).boxed(),
        ThriftType::Byte => any::<i8>().prop_map(ThriftValue::Byte).boxed(),
        // NaN is excluded: value equality deliberately treats NaNs as
        // unequal, and canonicalization has its own unit test.
        ThriftType::Double => any::<f64>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(ThriftValue::Double)
            .boxed(),
        ThriftType::I16 => any::<i16>().prop_map(ThriftValue::I16).boxed(),
        ThriftType::I32 => any::<i32>().prop_map(ThriftValue::I32).boxed(),
        ThriftType::I64 => any::<i64>().prop_map(ThriftValue::I64).boxed(),
        ThriftType::Binary => prop::collection::vec(any::<u8>(), 0..40)
            .prop_map(|b| ThriftValue::Binary(Bytes::from(b)))
            .boxed(),
        ThriftType::Struct => prop::collection::vec(
            (any::<i16>(), arb_type(depth - 1)).prop_flat_map(move |(id, field_ty)| {
                arb_value_of(field_ty, depth - 1)
                    .prop_map(move |value| ThriftField { id, value })
            }),
            0..4,
        )
        .prop_map(ThriftValue::Struct)
        .boxed(),
        ThriftType::Map => (arb_type(depth - 1), arb_type(depth - 1))
            .prop_flat_map(move |(key_ty, value_ty)| {
                prop::collection::vec(
                    (arb_value_of(key_ty, depth - 1), arb_value_of(value_ty, depth - 1)),
                    0..4,
                )
                .prop_map(move |pairs| {
                    let items = pairs
                        .into_iter()
                        .map(|(key, value)| ThriftMapItem { key, value })
                        .collect();
                    ThriftValue::Map(MapItemSeq::from_items(key_ty, value_ty, items))
                })
            })
            .boxed(),
        ThriftType::Set => arb_elements(depth).prop_map(ThriftValue::Set).boxed(),
        ThriftType::List => arb_elements(depth).prop_map(ThriftValue::List).boxed(),
    }
}

fn arb_elements(depth: u32) -> BoxedStrategy<ValueSeq> {
    arb_type(depth - 1)
        .prop_flat_map(move |elem_ty| {
            prop::collection::vec(arb_value_of(elem_ty, depth - 1), 0..4)
                .prop_map(move |values| ValueSeq::from_values(elem_ty, values))
        })
        .boxed()
}

fn arb_value() -> impl Strategy<Value = ThriftValue> {
    arb_type(2).prop_flat_map(|ty| arb_value_of(ty, 2))
}

fn encode_to_bytes(value: &ThriftValue) -> Bytes {
    let mut buf = BytesMut::new();
    encode_value(&mut buf, value).expect("encode failed");
    buf.freeze()
}

proptest! {
    /// decode(encode(v)) normalizes to the same tree as v.
    #[test]
    fn round_trip_normalized(value in arb_value()) {
        let encoded = encode_to_bytes(&value);

        let mut cursor = encoded.clone();
        let decoded = decode_value(&mut cursor, value.wire_type()).expect("decode failed");
        prop_assert!(cursor.is_empty(), "decoder left {} bytes", cursor.len());

        prop_assert_eq!(
            decoded.to_primitive().expect("drain failed"),
            value.to_primitive().expect("drain failed"),
        );
    }

    /// Re-encoding a decoded value, lazy bodies and all, reproduces the
    /// input bytes exactly.
    #[test]
    fn reencode_is_identity(value in arb_value()) {
        let encoded = encode_to_bytes(&value);

        let mut cursor = encoded.clone();
        let decoded = decode_value(&mut cursor, value.wire_type()).expect("decode failed");

        prop_assert_eq!(encode_to_bytes(&decoded), encoded);
    }

    /// Every negative count in a list header is rejected as a decode error.
    #[test]
    fn negative_list_counts_rejected(count in i32::MIN..0) {
        let mut wire = vec![0x08]; // element type: i32
        wire.extend_from_slice(&count.to_be_bytes());

        let mut cursor = Bytes::from(wire);
        let err = decode_value(&mut cursor, ThriftType::List).unwrap_err();
        prop_assert!(err.is_decode_error(), "{}", err);
    }

    /// Every boolean byte other than 0x00 and 0x01 is rejected.
    #[test]
    fn invalid_boolean_bytes_rejected(byte in 0x02u8..=0xFFu8) {
        let mut cursor = Bytes::copy_from_slice(&[byte]);
        let err = decode_value(&mut cursor, ThriftType::Bool).unwrap_err();
        prop_assert!(err.is_decode_error(), "{}", err);
    }
}

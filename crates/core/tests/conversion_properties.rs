//! Property tests for the conversion matrix.
//!
//! Covers direct-tag identity for every primitive kind, wraparound
//! narrowing from the canonical widths, and text round trips.

use optval_core::{PrimitiveKind, Type, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn direct_tag_identity_signed(a in any::<i64>(), b in any::<i8>(), c in any::<i16>(), d in any::<i32>()) {
        prop_assert_eq!(Value::int(a).converter().to_int().unwrap(), a);
        prop_assert_eq!(Value::int64(a).converter().to_int64().unwrap(), a);
        prop_assert_eq!(Value::int8(b).converter().to_int8().unwrap(), b);
        prop_assert_eq!(Value::int16(c).converter().to_int16().unwrap(), c);
        prop_assert_eq!(Value::int32(d).converter().to_int32().unwrap(), d);
    }

    #[test]
    fn direct_tag_identity_unsigned(a in any::<u64>(), b in any::<u8>(), c in any::<u16>(), d in any::<u32>()) {
        prop_assert_eq!(Value::uint(a).converter().to_uint().unwrap(), a);
        prop_assert_eq!(Value::uint64(a).converter().to_uint64().unwrap(), a);
        prop_assert_eq!(Value::uint8(b).converter().to_uint8().unwrap(), b);
        prop_assert_eq!(Value::uint16(c).converter().to_uint16().unwrap(), c);
        prop_assert_eq!(Value::uint32(d).converter().to_uint32().unwrap(), d);
    }

    #[test]
    fn direct_tag_identity_other(b in any::<bool>(), s in ".*", x in -1.0e30f64..1.0e30, y in -1.0e30f32..1.0e30) {
        prop_assert_eq!(Value::bool(b).converter().to_bool().unwrap(), b);
        prop_assert_eq!(Value::string(s.clone()).converter().to_string().unwrap(), s);
        prop_assert_eq!(Value::float64(x).converter().to_float64().unwrap(), x);
        prop_assert_eq!(Value::float32(y).converter().to_float32().unwrap(), y);
    }

    #[test]
    fn narrowing_matches_native_truncation(a in any::<i64>(), u in any::<u64>()) {
        let v = Value::int(a);
        prop_assert_eq!(v.converter().to_int8().unwrap(), a as i8);
        prop_assert_eq!(v.converter().to_int16().unwrap(), a as i16);
        prop_assert_eq!(v.converter().to_int32().unwrap(), a as i32);
        let v = Value::uint(u);
        prop_assert_eq!(v.converter().to_uint8().unwrap(), u as u8);
        prop_assert_eq!(v.converter().to_uint16().unwrap(), u as u16);
        prop_assert_eq!(v.converter().to_uint32().unwrap(), u as u32);
    }

    #[test]
    fn integer_text_round_trips(a in any::<i64>(), u in any::<u64>()) {
        let text = Value::int(a).converter().to_string().unwrap();
        prop_assert_eq!(Value::string(text).converter().to_int().unwrap(), a);
        let text = Value::uint(u).converter().to_string().unwrap();
        prop_assert_eq!(Value::string(text).converter().to_uint().unwrap(), u);
    }

    #[test]
    fn float_text_round_trips(x in -1.0e300f64..1.0e300) {
        let text = Value::float64(x).converter().to_string().unwrap();
        prop_assert_eq!(Value::string(text).converter().to_float64().unwrap(), x);
    }
}

#[test]
fn every_kind_has_a_singleton_descriptor() {
    for kind in PrimitiveKind::ALL {
        assert_eq!(Type::primitive(kind), &Type::Primitive(kind));
    }
}

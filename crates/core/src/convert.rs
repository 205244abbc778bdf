//! Type-directed conversion.
//!
//! [`Converter`] produces any primitive representation of a value from its
//! declared type:
//! - same declared kind: extract directly, rejecting a payload of another shape
//! - integers: from any narrower integer of the same signedness, or from
//!   base-10 text; narrower targets go through `i64`/`u64` and wrap
//! - floats: between the two widths, or from text
//! - strings: from every primitive, and from maps as JSON object text

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{ValueError, ValueResult};
use crate::types::{PrimitiveKind, Type};
use crate::value::{Payload, Value};

/// Borrowing view over a value that performs conversions.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    value: &'a Value,
}

impl<'a> Converter<'a> {
    pub fn new(value: &'a Value) -> Self {
        Converter { value }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    // ── signed integers ─────────────────────────

    pub fn to_int(&self) -> ValueResult<i64> {
        self.widest_signed(PrimitiveKind::Int)
    }

    pub fn to_int8(&self) -> ValueResult<i8> {
        if let Some(direct) = self.exact(PrimitiveKind::Int8, |p| match p {
            Payload::Int8(i) => Some(*i),
            _ => None,
        }) {
            return direct;
        }
        Ok(self.widest_signed(PrimitiveKind::Int8)? as i8)
    }

    pub fn to_int16(&self) -> ValueResult<i16> {
        if let Some(direct) = self.exact(PrimitiveKind::Int16, |p| match p {
            Payload::Int16(i) => Some(*i),
            _ => None,
        }) {
            return direct;
        }
        Ok(self.widest_signed(PrimitiveKind::Int16)? as i16)
    }

    pub fn to_int32(&self) -> ValueResult<i32> {
        if let Some(direct) = self.exact(PrimitiveKind::Int32, |p| match p {
            Payload::Int32(i) => Some(*i),
            _ => None,
        }) {
            return direct;
        }
        Ok(self.widest_signed(PrimitiveKind::Int32)? as i32)
    }

    pub fn to_int64(&self) -> ValueResult<i64> {
        if let Some(direct) = self.exact(PrimitiveKind::Int64, |p| match p {
            Payload::Int64(i) => Some(*i),
            _ => None,
        }) {
            return direct;
        }
        self.widest_signed(PrimitiveKind::Int64)
    }

    // ── unsigned integers ───────────────────────

    pub fn to_uint(&self) -> ValueResult<u64> {
        self.widest_unsigned(PrimitiveKind::Uint)
    }

    pub fn to_uint8(&self) -> ValueResult<u8> {
        if let Some(direct) = self.exact(PrimitiveKind::Uint8, |p| match p {
            Payload::Uint8(u) => Some(*u),
            _ => None,
        }) {
            return direct;
        }
        Ok(self.widest_unsigned(PrimitiveKind::Uint8)? as u8)
    }

    pub fn to_uint16(&self) -> ValueResult<u16> {
        if let Some(direct) = self.exact(PrimitiveKind::Uint16, |p| match p {
            Payload::Uint16(u) => Some(*u),
            _ => None,
        }) {
            return direct;
        }
        Ok(self.widest_unsigned(PrimitiveKind::Uint16)? as u16)
    }

    pub fn to_uint32(&self) -> ValueResult<u32> {
        if let Some(direct) = self.exact(PrimitiveKind::Uint32, |p| match p {
            Payload::Uint32(u) => Some(*u),
            _ => None,
        }) {
            return direct;
        }
        Ok(self.widest_unsigned(PrimitiveKind::Uint32)? as u32)
    }

    pub fn to_uint64(&self) -> ValueResult<u64> {
        if let Some(direct) = self.exact(PrimitiveKind::Uint64, |p| match p {
            Payload::Uint64(u) => Some(*u),
            _ => None,
        }) {
            return direct;
        }
        self.widest_unsigned(PrimitiveKind::Uint64)
    }

    // ── floats ──────────────────────────────────

    pub fn to_float32(&self) -> ValueResult<f32> {
        self.guard()?;
        match self.declared() {
            Some(PrimitiveKind::Float32) => match self.value.payload() {
                Payload::Float32(x) => Ok(*x),
                _ => Err(self.mismatch()),
            },
            Some(PrimitiveKind::Float64) => match self.value.payload() {
                Payload::Float64(x) => Ok(*x as f32),
                _ => Err(self.mismatch()),
            },
            Some(PrimitiveKind::String) => {
                Ok(self.parse::<f64>(PrimitiveKind::Float32)? as f32)
            }
            _ => Err(self.unsupported(PrimitiveKind::Float32.name())),
        }
    }

    pub fn to_float64(&self) -> ValueResult<f64> {
        self.guard()?;
        match self.declared() {
            Some(PrimitiveKind::Float64) => match self.value.payload() {
                Payload::Float64(x) => Ok(*x),
                _ => Err(self.mismatch()),
            },
            Some(PrimitiveKind::String) => self.parse::<f64>(PrimitiveKind::Float64),
            Some(PrimitiveKind::Float32) => match self.value.payload() {
                Payload::Float32(x) => Ok(f64::from(*x)),
                _ => Err(self.mismatch()),
            },
            _ => Err(self.unsupported(PrimitiveKind::Float64.name())),
        }
    }

    // ── bool and text ───────────────────────────

    pub fn to_bool(&self) -> ValueResult<bool> {
        self.guard()?;
        match self.declared() {
            Some(PrimitiveKind::Bool) => match self.value.payload() {
                Payload::Bool(b) => Ok(*b),
                _ => Err(self.mismatch()),
            },
            Some(PrimitiveKind::String) => {
                let text = self.text()?;
                parse_bool(text).ok_or_else(|| ValueError::Parse {
                    input: text.to_string(),
                    to: PrimitiveKind::Bool.name().to_string(),
                    message: "invalid syntax".to_string(),
                })
            }
            _ => Err(self.unsupported(PrimitiveKind::Bool.name())),
        }
    }

    /// Text form of the value. Maps render as a JSON object.
    pub fn to_string(&self) -> ValueResult<String> {
        self.guard()?;
        let kind = match self.value.ty() {
            Type::StringMap(_) => {
                let bytes = self.to_json_bytes()?;
                return String::from_utf8(bytes)
                    .map_err(|_| self.unsupported(PrimitiveKind::String.name()));
            }
            Type::Primitive(kind) => *kind,
        };
        match kind {
            PrimitiveKind::String => self.text().map(str::to_string),
            PrimitiveKind::Bool => self.to_bool().map(|b| b.to_string()),
            PrimitiveKind::Float32 => match self.value.payload() {
                Payload::Float32(x) => Ok(format_float32(*x)),
                _ => Err(self.mismatch()),
            },
            PrimitiveKind::Float64 => match self.value.payload() {
                Payload::Float64(x) => Ok(format_float64(*x)),
                _ => Err(self.mismatch()),
            },
            k if k.is_signed_integer() => self.to_int64().map(|i| i.to_string()),
            _ => self.to_uint64().map(|u| u.to_string()),
        }
    }

    /// JSON object encoding of a map value.
    pub fn to_json_bytes(&self) -> ValueResult<Vec<u8>> {
        self.guard()?;
        if !self.value.ty().is_map() {
            return Err(self.unsupported("json"));
        }
        let Payload::Map(fields) = self.value.payload() else {
            return Err(self.mismatch());
        };
        for (name, payload) in fields {
            check_finite(name, payload)?;
        }
        serde_json::to_vec(self.value.payload()).map_err(|_| self.unsupported("json"))
    }

    /// Convert into a new value of the requested kind.
    pub fn to_kind(&self, kind: PrimitiveKind) -> ValueResult<Value> {
        Ok(match kind {
            PrimitiveKind::Bool => Value::bool(self.to_bool()?),
            PrimitiveKind::String => Value::string(self.to_string()?),
            PrimitiveKind::Int => Value::int(self.to_int()?),
            PrimitiveKind::Int8 => Value::int8(self.to_int8()?),
            PrimitiveKind::Int16 => Value::int16(self.to_int16()?),
            PrimitiveKind::Int32 => Value::int32(self.to_int32()?),
            PrimitiveKind::Int64 => Value::int64(self.to_int64()?),
            PrimitiveKind::Uint => Value::uint(self.to_uint()?),
            PrimitiveKind::Uint8 => Value::uint8(self.to_uint8()?),
            PrimitiveKind::Uint16 => Value::uint16(self.to_uint16()?),
            PrimitiveKind::Uint32 => Value::uint32(self.to_uint32()?),
            PrimitiveKind::Uint64 => Value::uint64(self.to_uint64()?),
            PrimitiveKind::Float32 => Value::float32(self.to_float32()?),
            PrimitiveKind::Float64 => Value::float64(self.to_float64()?),
        })
    }

    // ──────────────────────────────────────────
    // Helpers
    // ──────────────────────────────────────────

    fn declared(&self) -> Option<PrimitiveKind> {
        self.value.ty().as_primitive()
    }

    fn guard(&self) -> ValueResult<()> {
        self.value.reject_null()
    }

    fn unsupported(&self, to: &str) -> ValueError {
        ValueError::Conversion {
            from: self.value.ty().friendly_name(),
            to: to.to_string(),
        }
    }

    fn mismatch(&self) -> ValueError {
        ValueError::TagMismatch {
            declared: self.value.ty().friendly_name(),
            found: self.value.payload().shape_name().to_string(),
        }
    }

    /// Direct extraction when the declared kind is `kind`; `None` otherwise.
    fn exact<T>(
        &self,
        kind: PrimitiveKind,
        extract: fn(&Payload) -> Option<T>,
    ) -> Option<ValueResult<T>> {
        if self.declared() != Some(kind) {
            return None;
        }
        if let Err(e) = self.guard() {
            return Some(Err(e));
        }
        Some(extract(self.value.payload()).ok_or_else(|| self.mismatch()))
    }

    fn text(&self) -> ValueResult<&'a str> {
        match self.value.payload() {
            Payload::String(s) => Ok(s.as_str()),
            _ => Err(self.mismatch()),
        }
    }

    fn parse<T>(&self, to: PrimitiveKind) -> ValueResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let text = self.text()?;
        text.parse::<T>().map_err(|e| ValueError::Parse {
            input: text.to_string(),
            to: to.name().to_string(),
            message: e.to_string(),
        })
    }

    /// Canonical signed conversion; `target` only names the requested kind in errors.
    fn widest_signed(&self, target: PrimitiveKind) -> ValueResult<i64> {
        self.guard()?;
        let payload = self.value.payload();
        match self.declared() {
            Some(PrimitiveKind::String) => self.parse::<i64>(target),
            Some(kind) if kind.is_signed_integer() => match (kind, payload) {
                (PrimitiveKind::Int, Payload::Int(i)) => Ok(*i),
                (PrimitiveKind::Int8, Payload::Int8(i)) => Ok(i64::from(*i)),
                (PrimitiveKind::Int16, Payload::Int16(i)) => Ok(i64::from(*i)),
                (PrimitiveKind::Int32, Payload::Int32(i)) => Ok(i64::from(*i)),
                (PrimitiveKind::Int64, Payload::Int64(i)) => Ok(*i),
                _ => Err(self.mismatch()),
            },
            _ => Err(self.unsupported(target.name())),
        }
    }

    fn widest_unsigned(&self, target: PrimitiveKind) -> ValueResult<u64> {
        self.guard()?;
        let payload = self.value.payload();
        match self.declared() {
            Some(PrimitiveKind::String) => self.parse::<u64>(target),
            Some(kind) if kind.is_unsigned_integer() => match (kind, payload) {
                (PrimitiveKind::Uint, Payload::Uint(u)) => Ok(*u),
                (PrimitiveKind::Uint8, Payload::Uint8(u)) => Ok(u64::from(*u)),
                (PrimitiveKind::Uint16, Payload::Uint16(u)) => Ok(u64::from(*u)),
                (PrimitiveKind::Uint32, Payload::Uint32(u)) => Ok(u64::from(*u)),
                (PrimitiveKind::Uint64, Payload::Uint64(u)) => Ok(*u),
                _ => Err(self.mismatch()),
            },
            _ => Err(self.unsupported(target.name())),
        }
    }
}

/// Boolean spellings accepted from text.
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn check_finite(field: &str, payload: &Payload) -> ValueResult<()> {
    let finite = match payload {
        Payload::Float32(x) => x.is_finite(),
        Payload::Float64(x) => x.is_finite(),
        Payload::Map(fields) => {
            for (name, inner) in fields {
                check_finite(&format!("{}.{}", field, name), inner)?;
            }
            true
        }
        _ => true,
    };
    if finite {
        Ok(())
    } else {
        Err(ValueError::NonFiniteJson {
            field: field.to_string(),
        })
    }
}

/// Scientific notation with the shortest round-trip mantissa, e.g. `1.233E+02`.
pub fn format_float64(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    signed_exponent(&format!("{:E}", x))
}

/// Like [`format_float64`], using the shortest mantissa that round-trips as `f32`.
pub fn format_float32(x: f32) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    signed_exponent(&format!("{:E}", x))
}

// Rust prints `1.5E3` / `1E-7`; rewrite the exponent as `E+03` / `E-07`.
fn signed_exponent(raw: &str) -> String {
    match raw.split_once('E') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }
        None => raw.to_string(),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn string_identity() {
        let v = Value::string("hello world");
        assert_eq!(v.converter().to_string().unwrap(), "hello world");
    }

    #[test]
    fn parse_integers_from_text() {
        let v = Value::string("24");
        assert_eq!(v.converter().to_int().unwrap(), 24);
        assert_eq!(v.converter().to_int64().unwrap(), 24);
        assert_eq!(v.converter().to_uint16().unwrap(), 24);
        assert_eq!(Value::string("-7").converter().to_int8().unwrap(), -7);
    }

    #[test]
    fn parse_failure_surfaces_parser_message() {
        let err = Value::string("twenty").converter().to_int().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        match err {
            ValueError::Parse { input, to, message } => {
                assert_eq!(input, "twenty");
                assert_eq!(to, "int");
                assert_eq!(message, "invalid digit found in string");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn widening_within_signedness() {
        assert_eq!(Value::int8(-5).converter().to_int().unwrap(), -5);
        assert_eq!(Value::int32(70_000).converter().to_int64().unwrap(), 70_000);
        assert_eq!(Value::uint16(65_535).converter().to_uint().unwrap(), 65_535);
        assert_eq!(Value::uint8(9).converter().to_uint64().unwrap(), 9);
    }

    #[test]
    fn narrowing_wraps_around() {
        let past_i32 = Value::int64(i64::from(i32::MAX) + 1);
        assert_eq!(past_i32.converter().to_int32().unwrap(), i32::MIN);
        assert_eq!(Value::int(128).converter().to_int8().unwrap(), -128);
        assert_eq!(Value::uint(256).converter().to_uint8().unwrap(), 0);
        assert_eq!(Value::string("300").converter().to_uint8().unwrap(), 44);
    }

    #[test]
    fn signedness_is_not_crossed() {
        let err = Value::uint(1).converter().to_int().unwrap_err();
        assert_eq!(
            err,
            ValueError::Conversion {
                from: "uint".to_string(),
                to: "int".to_string()
            }
        );
        let err = Value::int8(1).converter().to_uint8().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    #[test]
    fn narrow_target_names_itself_in_errors() {
        let err = Value::bool(true).converter().to_int16().unwrap_err();
        assert_eq!(
            err,
            ValueError::Conversion {
                from: "bool".to_string(),
                to: "int16".to_string()
            }
        );
    }

    #[test]
    fn tag_payload_mismatch_is_never_coerced() {
        let forged = Value::from_parts(
            Type::Primitive(PrimitiveKind::Int8),
            Payload::Int(3),
        );
        let err = forged.converter().to_int8().unwrap_err();
        assert_eq!(
            err,
            ValueError::TagMismatch {
                declared: "int8".to_string(),
                found: "int".to_string()
            }
        );
        assert!(forged.converter().to_int().is_err());
        assert!(forged.converter().to_string().is_err());

        let forged = Value::from_parts(Type::Primitive(PrimitiveKind::String), Payload::Bool(true));
        assert_eq!(
            forged.converter().to_int().unwrap_err().kind(),
            ErrorKind::Conversion
        );
    }

    #[test]
    fn float_conversions() {
        assert_eq!(Value::float64(1.5).converter().to_float32().unwrap(), 1.5f32);
        assert_eq!(Value::float32(0.25).converter().to_float64().unwrap(), 0.25);
        assert_eq!(Value::string("2.5").converter().to_float64().unwrap(), 2.5);
        assert_eq!(Value::string("2.5").converter().to_float32().unwrap(), 2.5f32);
        assert_eq!(
            Value::int(1).converter().to_float64().unwrap_err().kind(),
            ErrorKind::Conversion
        );
    }

    #[test]
    fn bool_conversions() {
        assert!(Value::string("T").converter().to_bool().unwrap());
        assert!(!Value::string("0").converter().to_bool().unwrap());
        assert!(Value::string("yes").converter().to_bool().is_err());
        assert!(Value::int(1).converter().to_bool().is_err());
    }

    #[test]
    fn to_string_formats_every_primitive() {
        assert_eq!(Value::bool(false).converter().to_string().unwrap(), "false");
        assert_eq!(Value::int16(-12).converter().to_string().unwrap(), "-12");
        assert_eq!(
            Value::uint64(u64::MAX).converter().to_string().unwrap(),
            "18446744073709551615"
        );
        assert_eq!(
            Value::float64(123.3).converter().to_string().unwrap(),
            "1.233E+02"
        );
        assert_eq!(
            Value::float32(123.3).converter().to_string().unwrap(),
            "1.233E+02"
        );
        assert_eq!(Value::float64(0.0).converter().to_string().unwrap(), "0E+00");
        assert_eq!(
            Value::float64(-1e-7).converter().to_string().unwrap(),
            "-1E-07"
        );
        assert_eq!(
            Value::float64(f64::NAN).converter().to_string().unwrap(),
            "NaN"
        );
    }

    #[test]
    fn map_to_string_and_json() {
        let v = Value::map_string([("hello", Value::string("hello world"))]).unwrap();
        assert_eq!(v.converter().to_string().unwrap(), r#"{"hello":"hello world"}"#);
        assert_eq!(
            v.converter().to_json_bytes().unwrap(),
            br#"{"hello":"hello world"}"#.to_vec()
        );
    }

    #[test]
    fn json_nests_maps_and_keeps_native_types() {
        let inner = Value::map_string([("n", Value::uint8(3))]).unwrap();
        let v = Value::map_string([
            ("ok", Value::bool(true)),
            ("inner", inner),
            ("x", Value::float64(0.5)),
        ])
        .unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&v.converter().to_json_bytes().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"ok": true, "inner": {"n": 3}, "x": 0.5}));
    }

    #[test]
    fn json_rejects_primitives_and_non_finite() {
        assert_eq!(
            Value::int(1).converter().to_json_bytes().unwrap_err(),
            ValueError::Conversion {
                from: "int".to_string(),
                to: "json".to_string()
            }
        );
        let v = Value::map_string([("x", Value::float64(f64::INFINITY))]).unwrap();
        assert_eq!(
            v.converter().to_json_bytes().unwrap_err(),
            ValueError::NonFiniteJson {
                field: "x".to_string()
            }
        );
    }

    #[test]
    fn maps_do_not_convert_to_scalars() {
        let v = Value::map_string([("a", Value::int(1))]).unwrap();
        assert_eq!(v.converter().to_int().unwrap_err().kind(), ErrorKind::Conversion);
        assert_eq!(v.converter().to_bool().unwrap_err().kind(), ErrorKind::Conversion);
    }

    #[test]
    fn null_values_refuse_every_conversion() {
        for kind in PrimitiveKind::ALL {
            let v = Value::null(Type::Primitive(kind));
            let err = v.converter().to_kind(kind).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NullOperation, "{}", kind);
        }
        let err = Value::null(Type::Primitive(PrimitiveKind::Int))
            .converter()
            .to_string()
            .unwrap_err();
        assert_eq!(
            err,
            ValueError::NullOperation {
                ty: "int".to_string()
            }
        );
    }

    #[test]
    fn to_kind_reaches_every_target() {
        let v = Value::string("42");
        for kind in PrimitiveKind::ALL {
            if kind == PrimitiveKind::Bool {
                continue;
            }
            let converted = v.converter().to_kind(kind).unwrap();
            assert_eq!(converted.ty().as_primitive(), Some(kind));
        }
    }
}

//! The value container.
//!
//! A [`Value`] pairs a [`Type`] with a [`Payload`]. The declared type is
//! authoritative; the converter re-checks the payload against it instead of
//! trusting it.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::convert::Converter;
use crate::error::{ValueError, ValueResult};
use crate::types::{PrimitiveKind, Type};

// ──────────────────────────────────────────────
// Payload
// ──────────────────────────────────────────────

/// Raw runtime data of a value, one variant per primitive kind.
///
/// Serializes to its JSON-native form (numbers, strings, booleans, objects).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Null,
    Bool(bool),
    String(String),
    Int(i64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(u64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Map(BTreeMap<String, Payload>),
}

impl Payload {
    /// The primitive kind this payload represents, if any.
    pub fn kind(&self) -> Option<PrimitiveKind> {
        match self {
            Payload::Bool(_) => Some(PrimitiveKind::Bool),
            Payload::String(_) => Some(PrimitiveKind::String),
            Payload::Int(_) => Some(PrimitiveKind::Int),
            Payload::Int8(_) => Some(PrimitiveKind::Int8),
            Payload::Int16(_) => Some(PrimitiveKind::Int16),
            Payload::Int32(_) => Some(PrimitiveKind::Int32),
            Payload::Int64(_) => Some(PrimitiveKind::Int64),
            Payload::Uint(_) => Some(PrimitiveKind::Uint),
            Payload::Uint8(_) => Some(PrimitiveKind::Uint8),
            Payload::Uint16(_) => Some(PrimitiveKind::Uint16),
            Payload::Uint32(_) => Some(PrimitiveKind::Uint32),
            Payload::Uint64(_) => Some(PrimitiveKind::Uint64),
            Payload::Float32(_) => Some(PrimitiveKind::Float32),
            Payload::Float64(_) => Some(PrimitiveKind::Float64),
            Payload::Null | Payload::Map(_) => None,
        }
    }

    /// Short name of the payload's shape for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Payload::Null => "null",
            Payload::Map(_) => "map",
            other => other.kind().map(PrimitiveKind::name).unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("<null>"),
            Payload::Bool(b) => write!(f, "{}", b),
            Payload::String(s) => f.write_str(s),
            Payload::Int(i) | Payload::Int64(i) => write!(f, "{}", i),
            Payload::Int8(i) => write!(f, "{}", i),
            Payload::Int16(i) => write!(f, "{}", i),
            Payload::Int32(i) => write!(f, "{}", i),
            Payload::Uint(u) | Payload::Uint64(u) => write!(f, "{}", u),
            Payload::Uint8(u) => write!(f, "{}", u),
            Payload::Uint16(u) => write!(f, "{}", u),
            Payload::Uint32(u) => write!(f, "{}", u),
            Payload::Float32(x) => write!(f, "{}", x),
            Payload::Float64(x) => write!(f, "{}", x),
            Payload::Map(fields) => {
                f.write_str("map[")?;
                for (i, (name, payload)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", name, payload)?;
                }
                f.write_str("]")
            }
        }
    }
}

// ──────────────────────────────────────────────
// Value
// ──────────────────────────────────────────────

/// A typed dynamic value.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    ty: Type,
    payload: Payload,
}

impl Value {
    fn primitive(kind: PrimitiveKind, payload: Payload) -> Value {
        Value {
            ty: Type::primitive(kind).clone(),
            payload,
        }
    }

    pub fn bool(v: bool) -> Value {
        Value::primitive(PrimitiveKind::Bool, Payload::Bool(v))
    }

    pub fn string(v: impl Into<String>) -> Value {
        Value::primitive(PrimitiveKind::String, Payload::String(v.into()))
    }

    pub fn int(v: i64) -> Value {
        Value::primitive(PrimitiveKind::Int, Payload::Int(v))
    }

    pub fn int8(v: i8) -> Value {
        Value::primitive(PrimitiveKind::Int8, Payload::Int8(v))
    }

    pub fn int16(v: i16) -> Value {
        Value::primitive(PrimitiveKind::Int16, Payload::Int16(v))
    }

    pub fn int32(v: i32) -> Value {
        Value::primitive(PrimitiveKind::Int32, Payload::Int32(v))
    }

    pub fn int64(v: i64) -> Value {
        Value::primitive(PrimitiveKind::Int64, Payload::Int64(v))
    }

    pub fn uint(v: u64) -> Value {
        Value::primitive(PrimitiveKind::Uint, Payload::Uint(v))
    }

    pub fn uint8(v: u8) -> Value {
        Value::primitive(PrimitiveKind::Uint8, Payload::Uint8(v))
    }

    pub fn uint16(v: u16) -> Value {
        Value::primitive(PrimitiveKind::Uint16, Payload::Uint16(v))
    }

    pub fn uint32(v: u32) -> Value {
        Value::primitive(PrimitiveKind::Uint32, Payload::Uint32(v))
    }

    pub fn uint64(v: u64) -> Value {
        Value::primitive(PrimitiveKind::Uint64, Payload::Uint64(v))
    }

    pub fn float32(v: f32) -> Value {
        Value::primitive(PrimitiveKind::Float32, Payload::Float32(v))
    }

    pub fn float64(v: f64) -> Value {
        Value::primitive(PrimitiveKind::Float64, Payload::Float64(v))
    }

    /// A typed absence. Only type inspection is allowed on it; every
    /// conversion fails with `NullOperation`.
    pub fn null(ty: Type) -> Value {
        Value {
            ty,
            payload: Payload::Null,
        }
    }

    /// Fails with `NullOperation` when the value is null.
    pub fn reject_null(&self) -> ValueResult<()> {
        if self.is_null() {
            return Err(ValueError::NullOperation {
                ty: self.ty.friendly_name(),
            });
        }
        Ok(())
    }

    /// Build a map value from named fields.
    ///
    /// The map's type records each field's declared type; the payload keeps
    /// each field's raw payload.
    pub fn map_string<K: Into<String>>(
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> ValueResult<Value> {
        let mut attrs = BTreeMap::new();
        let mut raw = BTreeMap::new();
        for (name, value) in fields {
            let name = name.into();
            attrs.insert(name.clone(), value.ty);
            raw.insert(name, value.payload);
        }
        if attrs.is_empty() {
            return Err(ValueError::EmptyMap);
        }
        Ok(Value {
            ty: Type::StringMap(attrs),
            payload: Payload::Map(raw),
        })
    }

    /// A map value with no fields, used as a starting point for `set_field`.
    pub fn empty_map() -> Value {
        Value {
            ty: Type::StringMap(BTreeMap::new()),
            payload: Payload::Map(BTreeMap::new()),
        }
    }

    /// Assemble a value without checking that `payload` matches `ty`.
    ///
    /// Mismatches are reported later, by the converter.
    pub fn from_parts(ty: Type, payload: Payload) -> Value {
        Value { ty, payload }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_parts(self) -> (Type, Payload) {
        (self.ty, self.payload)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.payload, Payload::Null)
    }

    pub fn is_primitive_value(&self) -> bool {
        self.ty.is_primitive()
    }

    pub fn is_map_value(&self) -> bool {
        self.ty.is_map()
    }

    pub fn converter(&self) -> Converter<'_> {
        Converter::new(self)
    }

    /// Declared field names of a map value, in sorted order.
    pub fn field_names(&self) -> Vec<&str> {
        match &self.ty {
            Type::StringMap(attrs) => attrs.keys().map(String::as_str).collect(),
            Type::Primitive(_) => Vec::new(),
        }
    }

    /// Read one field of a map value.
    pub fn get_field(&self, name: &str) -> ValueResult<Value> {
        self.reject_null()?;
        let not_found = || ValueError::FieldNotFound {
            field: name.to_string(),
        };
        let Type::StringMap(attrs) = &self.ty else {
            return Err(not_found());
        };
        let ty = attrs.get(name).ok_or_else(not_found)?;
        let Payload::Map(raw) = &self.payload else {
            return Err(ValueError::TagMismatch {
                declared: self.ty.friendly_name(),
                found: self.payload.shape_name().to_string(),
            });
        };
        let payload = raw.get(name).ok_or_else(not_found)?;
        Ok(Value {
            ty: ty.clone(),
            payload: payload.clone(),
        })
    }

    /// Insert or overwrite a field of a map value, registering its type.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) -> ValueResult<()> {
        self.reject_null()?;
        let name = name.into();
        let Payload::Map(raw) = &mut self.payload else {
            return Err(ValueError::type_mismatch("map", self.ty.friendly_name()));
        };
        self.ty
            .update_map_field_types([(name.clone(), value.ty)])?;
        raw.insert(name, value.payload);
        Ok(())
    }

    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.payload.fmt(f)
    }
}

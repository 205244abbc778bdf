//! Alignment: writing converted values into caller-owned locations.
//!
//! A [`Target`] names the expected kind of an output location and holds the
//! location itself. `None` stands for a nil reference and is always rejected
//! with `InvalidTarget`. Records expose their fields through [`Record`].

use crate::error::{ValueError, ValueResult};
use crate::value::Value;

/// A settable output location, one variant per supported kind.
pub enum Target<'a> {
    Bool(Option<&'a mut bool>),
    String(Option<&'a mut String>),
    Int(Option<&'a mut i64>),
    Int8(Option<&'a mut i8>),
    Int16(Option<&'a mut i16>),
    Int32(Option<&'a mut i32>),
    Int64(Option<&'a mut i64>),
    Uint(Option<&'a mut u64>),
    Uint8(Option<&'a mut u8>),
    Uint16(Option<&'a mut u16>),
    Uint32(Option<&'a mut u32>),
    Uint64(Option<&'a mut u64>),
    Float32(Option<&'a mut f32>),
    Float64(Option<&'a mut f64>),
    Record(Option<&'a mut dyn Record>),
}

/// A caller-defined record whose fields can receive aligned values.
pub trait Record {
    /// One descriptor per alignable field.
    fn targets(&mut self) -> Vec<Align<'_>>;
}

/// A named field paired with where its value goes.
pub struct Align<'a> {
    pub field: String,
    pub target: Target<'a>,
}

/// Describe where field `field` of a map value is written.
pub fn align<'a>(field: impl Into<String>, target: impl Into<Target<'a>>) -> Align<'a> {
    Align {
        field: field.into(),
        target: target.into(),
    }
}

impl<'a> Target<'a> {
    pub fn record(record: &'a mut dyn Record) -> Target<'a> {
        Target::Record(Some(record))
    }

    /// Name of the kind this location expects.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Target::Bool(_) => "bool",
            Target::String(_) => "string",
            Target::Int(_) => "int",
            Target::Int8(_) => "int8",
            Target::Int16(_) => "int16",
            Target::Int32(_) => "int32",
            Target::Int64(_) => "int64",
            Target::Uint(_) => "uint",
            Target::Uint8(_) => "uint8",
            Target::Uint16(_) => "uint16",
            Target::Uint32(_) => "uint32",
            Target::Uint64(_) => "uint64",
            Target::Float32(_) => "float32",
            Target::Float64(_) => "float64",
            Target::Record(_) => "record",
        }
    }

    pub fn is_settable(&self) -> bool {
        match self {
            Target::Bool(slot) => slot.is_some(),
            Target::String(slot) => slot.is_some(),
            Target::Int(slot) | Target::Int64(slot) => slot.is_some(),
            Target::Int8(slot) => slot.is_some(),
            Target::Int16(slot) => slot.is_some(),
            Target::Int32(slot) => slot.is_some(),
            Target::Uint(slot) | Target::Uint64(slot) => slot.is_some(),
            Target::Uint8(slot) => slot.is_some(),
            Target::Uint16(slot) => slot.is_some(),
            Target::Uint32(slot) => slot.is_some(),
            Target::Float32(slot) => slot.is_some(),
            Target::Float64(slot) => slot.is_some(),
            Target::Record(slot) => slot.is_some(),
        }
    }

    fn invalid(&self) -> ValueError {
        ValueError::InvalidTarget {
            expected: self.kind_name().to_string(),
        }
    }

    /// Convert `value` to this location's kind and write it.
    pub fn set(self, value: &Value) -> ValueResult<()> {
        if !self.is_settable() {
            return Err(self.invalid());
        }
        let c = value.converter();
        match self {
            Target::Bool(Some(slot)) => *slot = c.to_bool()?,
            Target::String(Some(slot)) => *slot = c.to_string()?,
            Target::Int(Some(slot)) => *slot = c.to_int()?,
            Target::Int8(Some(slot)) => *slot = c.to_int8()?,
            Target::Int16(Some(slot)) => *slot = c.to_int16()?,
            Target::Int32(Some(slot)) => *slot = c.to_int32()?,
            Target::Int64(Some(slot)) => *slot = c.to_int64()?,
            Target::Uint(Some(slot)) => *slot = c.to_uint()?,
            Target::Uint8(Some(slot)) => *slot = c.to_uint8()?,
            Target::Uint16(Some(slot)) => *slot = c.to_uint16()?,
            Target::Uint32(Some(slot)) => *slot = c.to_uint32()?,
            Target::Uint64(Some(slot)) => *slot = c.to_uint64()?,
            Target::Float32(Some(slot)) => *slot = c.to_float32()?,
            Target::Float64(Some(slot)) => *slot = c.to_float64()?,
            Target::Record(Some(record)) => {
                if value.is_primitive_value() && !value.is_null() {
                    return Err(ValueError::Conversion {
                        from: value.ty().friendly_name(),
                        to: "record".to_string(),
                    });
                }
                value.aligns(record.targets())?
            }
            // Unsettable slots were rejected above.
            _ => {}
        }
        Ok(())
    }
}

macro_rules! target_from {
    ($ty:ty => $variant:ident) => {
        impl<'a> From<&'a mut $ty> for Target<'a> {
            fn from(slot: &'a mut $ty) -> Self {
                Target::$variant(Some(slot))
            }
        }
    };
}

target_from!(bool => Bool);
target_from!(String => String);
target_from!(i64 => Int);
target_from!(i8 => Int8);
target_from!(i16 => Int16);
target_from!(i32 => Int32);
target_from!(u64 => Uint);
target_from!(u8 => Uint8);
target_from!(u16 => Uint16);
target_from!(u32 => Uint32);
target_from!(f32 => Float32);
target_from!(f64 => Float64);

impl Value {
    /// Write this value into `target`, converting to the target's kind.
    pub fn align<'a>(&self, target: impl Into<Target<'a>>) -> ValueResult<()> {
        target.into().set(self)
    }

    /// Write several fields of a map value, stopping at the first failure.
    pub fn aligns<'a>(&self, aligns: impl IntoIterator<Item = Align<'a>>) -> ValueResult<()> {
        self.reject_null()?;
        if !self.is_map_value() {
            return Err(ValueError::type_mismatch("map", self.ty().friendly_name()));
        }
        for Align { field, target } in aligns {
            if !target.is_settable() {
                return Err(target.invalid());
            }
            self.get_field(&field)?.align(target)?;
        }
        Ok(())
    }
}

//! Type descriptors.
//!
//! A [`Type`] is either one of fourteen primitive kinds or a string-keyed map
//! whose attribute table records the type of every field. The set is closed:
//! every operation over types matches exhaustively.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{ValueError, ValueResult};

// ──────────────────────────────────────────────
// Primitive kinds
// ──────────────────────────────────────────────

/// The primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [PrimitiveKind; 14] = [
        PrimitiveKind::Bool,
        PrimitiveKind::String,
        PrimitiveKind::Int,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Uint,
        PrimitiveKind::Uint8,
        PrimitiveKind::Uint16,
        PrimitiveKind::Uint32,
        PrimitiveKind::Uint64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint => "uint",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint32",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
        }
    }

    /// Look a kind up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        PrimitiveKind::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int
                | PrimitiveKind::Int8
                | PrimitiveKind::Int16
                | PrimitiveKind::Int32
                | PrimitiveKind::Int64
        )
    }

    pub fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Uint
                | PrimitiveKind::Uint8
                | PrimitiveKind::Uint16
                | PrimitiveKind::Uint32
                | PrimitiveKind::Uint64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::Float32 | PrimitiveKind::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer() || self.is_float()
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────────────────────────────────
// Type descriptor
// ──────────────────────────────────────────────

/// Shape of a value.
///
/// Equality is structural: two maps are equal only when their attribute
/// tables are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(PrimitiveKind),
    StringMap(BTreeMap<String, Type>),
}

static PRIMITIVES: OnceLock<Vec<Type>> = OnceLock::new();

impl Type {
    /// The process-wide descriptor for a primitive kind.
    pub fn primitive(kind: PrimitiveKind) -> &'static Type {
        let table = PRIMITIVES.get_or_init(|| {
            PrimitiveKind::ALL
                .into_iter()
                .map(Type::Primitive)
                .collect()
        });
        // ALL is in declaration order, so the discriminant is the index.
        &table[kind as usize]
    }

    pub fn string_map(attrs: BTreeMap<String, Type>) -> Type {
        Type::StringMap(attrs)
    }

    pub fn equals(&self, other: &Type) -> bool {
        self == other
    }

    /// Human-readable English description.
    pub fn friendly_name(&self) -> String {
        match self {
            Type::Primitive(kind) => kind.name().to_string(),
            Type::StringMap(attrs) => {
                let mut out = String::from("map of [");
                for (name, ty) in attrs {
                    out.push('(');
                    out.push_str(name);
                    out.push('=');
                    out.push_str(&ty.friendly_name());
                    out.push(')');
                }
                out.push(']');
                out
            }
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Type::StringMap(_))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Type::Primitive(kind) => Some(*kind),
            Type::StringMap(_) => None,
        }
    }

    /// Number of attributes of a map type; 0 for primitives.
    pub fn len(&self) -> usize {
        match self {
            Type::Primitive(_) => 0,
            Type::StringMap(attrs) => attrs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_map_field_type(&self, key: &str) -> ValueResult<&Type> {
        match self {
            Type::StringMap(attrs) => attrs.get(key).ok_or_else(|| ValueError::FieldNotFound {
                field: key.to_string(),
            }),
            Type::Primitive(kind) => Err(ValueError::type_mismatch("map", kind.name())),
        }
    }

    /// Merge `additions` into a map type's attribute table.
    pub fn update_map_field_types(
        &mut self,
        additions: impl IntoIterator<Item = (String, Type)>,
    ) -> ValueResult<()> {
        match self {
            Type::StringMap(attrs) => {
                attrs.extend(additions);
                Ok(())
            }
            Type::Primitive(kind) => Err(ValueError::type_mismatch("map", kind.name())),
        }
    }
}

impl From<PrimitiveKind> for Type {
    fn from(kind: PrimitiveKind) -> Self {
        Type::Primitive(kind)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.friendly_name())
    }
}

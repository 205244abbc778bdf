//! The transform library used with [`process`](crate::process).
//!
//! String transforms fail with `NullOperation` on null values and with
//! `TypeMismatch` on any other kind.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use optval_core::{Payload, PrimitiveKind, Value, ValueError, ValueResult};

use crate::processor::Apply;

fn into_text(value: Value) -> ValueResult<String> {
    value.reject_null()?;
    let found = value.ty().friendly_name();
    match (value.ty().as_primitive(), value.into_parts().1) {
        (Some(PrimitiveKind::String), Payload::String(s)) => Ok(s),
        _ => Err(ValueError::type_mismatch("string", found)),
    }
}

fn map_text(f: impl Fn(&str) -> String + 'static) -> Apply {
    Apply::new(move |_, value| into_text(value).map(|s| Value::string(f(&s))))
}

fn cutset(chars: &str) -> Vec<char> {
    chars.chars().collect()
}

pub fn to_upper() -> Apply {
    map_text(str::to_uppercase)
}

pub fn to_lower() -> Apply {
    map_text(str::to_lowercase)
}

/// Strip leading and trailing characters contained in `chars`.
pub fn trim(chars: &str) -> Apply {
    let set = cutset(chars);
    map_text(move |s| s.trim_matches(set.as_slice()).to_string())
}

pub fn trim_space() -> Apply {
    map_text(|s| s.trim().to_string())
}

/// Strip leading characters contained in `chars`.
pub fn trim_left(chars: &str) -> Apply {
    let set = cutset(chars);
    map_text(move |s| s.trim_start_matches(set.as_slice()).to_string())
}

/// Strip trailing characters contained in `chars`.
pub fn trim_right(chars: &str) -> Apply {
    let set = cutset(chars);
    map_text(move |s| s.trim_end_matches(set.as_slice()).to_string())
}

/// Remove `prefix` once, if present.
pub fn trim_prefix(prefix: impl Into<String>) -> Apply {
    let prefix = prefix.into();
    map_text(move |s| s.strip_prefix(prefix.as_str()).unwrap_or(s).to_string())
}

/// Remove `suffix` once, if present.
pub fn trim_suffix(suffix: impl Into<String>) -> Apply {
    let suffix = suffix.into();
    map_text(move |s| s.strip_suffix(suffix.as_str()).unwrap_or(s).to_string())
}

/// Drop every whitespace character.
pub fn remove_space() -> Apply {
    map_text(|s| s.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Standard padded base64 of the string's UTF-8 bytes.
pub fn base64_encode() -> Apply {
    map_text(|s| STANDARD.encode(s.as_bytes()))
}

/// Replace the value with its Int conversion.
pub fn to_int() -> Apply {
    Apply::new(|_, value| value.converter().to_int().map(Value::int))
}

/// Replace the value with its conversion to `kind`.
pub fn to_kind(kind: PrimitiveKind) -> Apply {
    Apply::new(move |_, value| value.converter().to_kind(kind))
}

pub fn identity() -> Apply {
    Apply::new(|_, value| Ok(value))
}

//! The predicate library used with [`validate`](crate::validate).
//!
//! String predicates reject null values with `NullOperation` and non-string
//! values with a `must be a string` failure. `must_be_*` character-class
//! predicates hold for every character and are vacuously true on the empty
//! string; `must_have_*` predicates need at least one matching character.

use std::net::IpAddr;

use optval_core::{sentinel, PrimitiveKind, Payload, Value, ValueError, ValueResult};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_script::{Script, UnicodeScript};

use crate::validator::Match;

fn text<'v>(field: &str, value: &'v Value) -> ValueResult<&'v str> {
    value.reject_null()?;
    match (value.ty().as_primitive(), value.payload()) {
        (Some(PrimitiveKind::String), Payload::String(s)) => Ok(s),
        _ => Err(ValueError::validation(field, "must be a string")),
    }
}

fn text_check(
    reason: impl Into<String>,
    pred: impl Fn(&str) -> bool + 'static,
) -> Match {
    let reason = reason.into();
    Match::new(move |field, value| {
        if pred(text(field, value)?) {
            Ok(())
        } else {
            Err(ValueError::validation(field, reason.clone()))
        }
    })
}

fn every(reason: &'static str, class: fn(char) -> bool) -> Match {
    text_check(reason, move |s| s.chars().all(class))
}

fn any(reason: &'static str, class: fn(char) -> bool) -> Match {
    text_check(reason, move |s| s.chars().any(class))
}

// ──────────────────────────────────────────────
// Shape predicates
// ──────────────────────────────────────────────

/// Passes only non-zero primitives. Null values, maps, the empty string,
/// integer and float zero, and `false` all fail.
pub fn must_not_null() -> Match {
    Match::new(|field, value| {
        let present = match value.payload() {
            Payload::Null => false,
            Payload::Bool(b) => *b,
            Payload::String(s) => !s.is_empty(),
            Payload::Float32(x) => *x != 0.0,
            Payload::Float64(x) => *x != 0.0,
            Payload::Map(_) => false,
            Payload::Int(i) | Payload::Int64(i) => *i != 0,
            Payload::Int8(i) => *i != 0,
            Payload::Int16(i) => *i != 0,
            Payload::Int32(i) => *i != 0,
            Payload::Uint(u) | Payload::Uint64(u) => *u != 0,
            Payload::Uint8(u) => *u != 0,
            Payload::Uint16(u) => *u != 0,
            Payload::Uint32(u) => *u != 0,
        };
        if present {
            Ok(())
        } else {
            Err(ValueError::validation(field, "must not be null"))
        }
    })
}

pub fn must_be_string() -> Match {
    Match::new(|field, value| {
        if value.ty().as_primitive() == Some(PrimitiveKind::String) {
            Ok(())
        } else {
            Err(ValueError::validation(field, "must be a string"))
        }
    })
}

pub fn must_be_true() -> Match {
    Match::new(|field, value| {
        if value.equals(sentinel::true_value()) {
            Ok(())
        } else {
            Err(ValueError::validation(field, "must be true"))
        }
    })
}

/// A numeric value of any width, or a string that parses as an integer.
pub fn must_be_numeric() -> Match {
    Match::new(|field, value| {
        value.reject_null()?;
        let numeric = match value.ty().as_primitive() {
            Some(PrimitiveKind::String) => value.converter().to_int().is_ok(),
            Some(kind) => kind.is_numeric(),
            None => false,
        };
        if numeric {
            Ok(())
        } else {
            Err(ValueError::validation(field, "must be numeric"))
        }
    })
}

// ──────────────────────────────────────────────
// Literal predicates
// ──────────────────────────────────────────────

pub fn must_have_suffix(suffix: impl Into<String>) -> Match {
    let suffix = suffix.into();
    let reason = format!("must have suffix {:?}", suffix);
    text_check(reason, move |s| s.ends_with(suffix.as_str()))
}

pub fn must_contain(needle: impl Into<String>) -> Match {
    let needle = needle.into();
    let reason = format!("must contain {:?}", needle);
    text_check(reason, move |s| s.contains(needle.as_str()))
}

pub fn must_be_in<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Match {
    let options: Vec<String> = options.into_iter().map(Into::into).collect();
    let reason = format!("must be one of [{}]", options.join(", "));
    text_check(reason, move |s| options.iter().any(|o| o == s))
}

pub fn must_equal(expected: impl Into<String>) -> Match {
    let expected = expected.into();
    let reason = format!("must equal {:?}", expected);
    text_check(reason, move |s| s == expected)
}

// ──────────────────────────────────────────────
// Character classes
// ──────────────────────────────────────────────

/// Math, currency, modifier and other symbols. Punctuation is not a symbol.
fn is_symbol(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
    )
}

/// Decimal digits of any script. Fractions, numerals and superscripts are not.
fn is_digit(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

fn is_han(c: char) -> bool {
    c.script() == Script::Han
}

pub fn must_have_symbol() -> Match {
    any("must have a symbol", is_symbol)
}

pub fn must_have_digit() -> Match {
    any("must have a digit", is_digit)
}

pub fn must_have_letter() -> Match {
    any("must have a letter", char::is_alphabetic)
}

pub fn must_have_lower() -> Match {
    any("must have a lowercase letter", char::is_lowercase)
}

pub fn must_have_upper() -> Match {
    any("must have an uppercase letter", char::is_uppercase)
}

pub fn must_be_lower() -> Match {
    every("must be lowercase", char::is_lowercase)
}

pub fn must_be_upper() -> Match {
    every("must be uppercase", char::is_uppercase)
}

pub fn must_be_letter() -> Match {
    every("must be letters", char::is_alphabetic)
}

pub fn must_be_digit() -> Match {
    every("must be digits", is_digit)
}

pub fn must_be_lower_or_digit() -> Match {
    every("must be lowercase letters or digits", |c| {
        c.is_lowercase() || is_digit(c)
    })
}

pub fn must_be_upper_or_digit() -> Match {
    every("must be uppercase letters or digits", |c| {
        c.is_uppercase() || is_digit(c)
    })
}

pub fn must_be_letter_or_digit() -> Match {
    every("must be letters or digits", |c| {
        c.is_alphabetic() || is_digit(c)
    })
}

/// Every character is a Han ideograph.
pub fn must_be_han() -> Match {
    every("must be han characters", is_han)
}

// ──────────────────────────────────────────────
// Formats
// ──────────────────────────────────────────────

/// An absolute URL, or a rooted request path such as `/search?q=x`.
pub fn must_be_url() -> Match {
    text_check("must be a url", |s| {
        if s.starts_with('/') {
            url::Url::parse("http://localhost")
                .and_then(|base| base.join(s))
                .is_ok()
        } else {
            url::Url::parse(s).is_ok()
        }
    })
}

/// Hyphenated, simple, braced or `urn:uuid:` forms.
pub fn must_be_uuid() -> Match {
    text_check("must be a uuid", |s| uuid::Uuid::parse_str(s).is_ok())
}

/// A non-empty run of letters, digits, `-` and `_`.
pub fn must_be_sql_identifier() -> Match {
    text_check("must be a sql identifier", |s| {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    })
}

pub fn must_be_ip() -> Match {
    text_check("must be an ip address", |s| s.parse::<IpAddr>().is_ok())
}

/// A string holding a JSON document, or a map value that encodes as one.
pub fn must_be_json() -> Match {
    Match::new(|field, value| {
        if value.is_map_value() && !value.is_null() {
            return value
                .converter()
                .to_json_bytes()
                .map(|_| ())
                .map_err(|_| ValueError::validation(field, "must be json"));
        }
        let s = text(field, value)?;
        serde_json::from_str::<serde::de::IgnoredAny>(s)
            .map(|_| ())
            .map_err(|err| ValueError::validation(field, format!("must be json: {}", err)))
    })
}

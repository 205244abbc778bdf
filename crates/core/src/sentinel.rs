//! Process-wide constant values, built once on first access.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::types::Type;
use crate::value::Value;

struct Sentinels {
    true_value: Value,
    false_value: Value,
    zero: Value,
    positive_infinity: Value,
    negative_infinity: Value,
    null: Value,
}

static SENTINELS: OnceLock<Sentinels> = OnceLock::new();

fn sentinels() -> &'static Sentinels {
    SENTINELS.get_or_init(|| Sentinels {
        true_value: Value::bool(true),
        false_value: Value::bool(false),
        zero: Value::int(0),
        positive_infinity: Value::float64(f64::INFINITY),
        negative_infinity: Value::float64(f64::NEG_INFINITY),
        null: Value::null(Type::StringMap(BTreeMap::new())),
    })
}

pub fn true_value() -> &'static Value {
    &sentinels().true_value
}

pub fn false_value() -> &'static Value {
    &sentinels().false_value
}

/// Int zero.
pub fn zero() -> &'static Value {
    &sentinels().zero
}

pub fn positive_infinity() -> &'static Value {
    &sentinels().positive_infinity
}

pub fn negative_infinity() -> &'static Value {
    &sentinels().negative_infinity
}

/// The distinguished null: an absent value typed as the empty map.
pub fn null() -> &'static Value {
    &sentinels().null
}

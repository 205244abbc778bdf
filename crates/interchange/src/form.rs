//! `application/x-www-form-urlencoded` input.

use std::collections::BTreeMap;

use optval_core::{Value, ValueResult};

/// Build a map of string values from urlencoded text.
///
/// A leading `?` is ignored. When a key repeats, its first value wins.
/// Input with no parameters fails with `EmptyMap`.
pub fn form_value(query: &str) -> ValueResult<Value> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut fields: BTreeMap<String, Value> = BTreeMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        fields
            .entry(key.into_owned())
            .or_insert_with(|| Value::string(value.into_owned()));
    }
    Value::map_string(fields)
}

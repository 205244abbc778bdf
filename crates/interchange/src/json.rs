//! JSON object input.

use optval_core::{PrimitiveKind, Type, Value, ValueError, ValueResult};
use serde_json::{Map, Number};

/// Build a map value from a JSON object.
///
/// Strings, booleans and numbers become primitives, `null` becomes a null
/// string and nested objects become nested maps. Arrays are rejected.
pub fn json_value(body: &str) -> ValueResult<Value> {
    let parsed: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ValueError::InvalidInput {
            message: format!("malformed JSON: {}", e),
        })?;
    match parsed {
        serde_json::Value::Object(fields) => object(fields, true),
        other => Err(ValueError::InvalidInput {
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

fn object(fields: Map<String, serde_json::Value>, top_level: bool) -> ValueResult<Value> {
    if fields.is_empty() && !top_level {
        return Ok(Value::empty_map());
    }
    let mut converted = Vec::with_capacity(fields.len());
    for (name, json) in fields {
        let value = field(&name, json)?;
        converted.push((name, value));
    }
    Value::map_string(converted)
}

fn field(name: &str, json: serde_json::Value) -> ValueResult<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::null(Type::from(PrimitiveKind::String)),
        serde_json::Value::Bool(b) => Value::bool(b),
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Number(n) => number(&n),
        serde_json::Value::Object(fields) => object(fields, false)?,
        serde_json::Value::Array(_) => {
            return Err(ValueError::InvalidInput {
                message: format!("field {} holds an array, which has no value kind", name),
            })
        }
    })
}

fn number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::int(i)
    } else if let Some(u) = n.as_u64() {
        Value::uint(u)
    } else {
        Value::float64(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optval_core::ErrorKind;

    #[test]
    fn primitives_take_their_natural_kind() {
        let v = json_value(
            r#"{"name":"gorpher","admin":true,"age":24,"big":18446744073709551615,"score":9.5,"gone":null}"#,
        )
        .unwrap();
        assert_eq!(v.get_field("name").unwrap(), Value::string("gorpher"));
        assert_eq!(v.get_field("admin").unwrap(), Value::bool(true));
        assert_eq!(v.get_field("age").unwrap(), Value::int(24));
        assert_eq!(v.get_field("big").unwrap(), Value::uint(u64::MAX));
        assert_eq!(v.get_field("score").unwrap(), Value::float64(9.5));
        let gone = v.get_field("gone").unwrap();
        assert!(gone.is_null());
        assert_eq!(gone.ty(), Type::primitive(PrimitiveKind::String));
    }

    #[test]
    fn nested_objects_become_maps() {
        let v = json_value(r#"{"author":{"name":"g","tags":{}}}"#).unwrap();
        let author = v.get_field("author").unwrap();
        assert!(author.is_map_value());
        assert_eq!(author.get_field("name").unwrap(), Value::string("g"));
        assert!(author.get_field("tags").unwrap().ty().is_empty());
    }

    #[test]
    fn rejected_shapes() {
        assert_eq!(json_value("{}").unwrap_err(), ValueError::EmptyMap);
        for body in ["[1]", "3", r#"{"a":[1]}"#, "{not json"] {
            assert_eq!(
                json_value(body).unwrap_err().kind(),
                ErrorKind::InvalidInput,
                "body {}",
                body
            );
        }
    }
}

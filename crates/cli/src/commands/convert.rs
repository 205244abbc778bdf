use std::process;

use optval_core::{PrimitiveKind, Value, ValueResult};

use crate::commands::fail;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_convert(value: &str, from: &str, to: &str, output: OutputFormat, quiet: bool) {
    let (from, to) = match (kind(from), kind(to)) {
        (Ok(f), Ok(t)) => (f, t),
        (Err(msg), _) | (_, Err(msg)) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match convert(value, from, to) {
        Ok(converted) => {
            if quiet {
                return;
            }
            match output {
                OutputFormat::Json => {
                    let body = serde_json::json!({
                        "kind": to.name(),
                        "value": converted.payload(),
                    });
                    println!("{}", body);
                }
                OutputFormat::Text => match converted.converter().to_string() {
                    Ok(text) => println!("{}", text),
                    Err(err) => fail(&err, output, quiet),
                },
            }
        }
        Err(err) => fail(&err, output, quiet),
    }
}

/// Read `text` as `from`, then convert the result to `to`.
fn convert(text: &str, from: PrimitiveKind, to: PrimitiveKind) -> ValueResult<Value> {
    let source = Value::string(text).converter().to_kind(from)?;
    source.converter().to_kind(to)
}

fn kind(name: &str) -> Result<PrimitiveKind, String> {
    PrimitiveKind::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = PrimitiveKind::ALL.iter().map(|k| k.name()).collect();
        format!("unknown kind '{}'. Valid: {}", name, known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use optval_core::ErrorKind;

    #[test]
    fn text_is_read_then_narrowed() {
        let v = convert("300", PrimitiveKind::String, PrimitiveKind::Uint8).unwrap();
        assert_eq!(v, Value::uint8(44));
        let v = convert("2147483648", PrimitiveKind::Int64, PrimitiveKind::Int32).unwrap();
        assert_eq!(v, Value::int32(-2147483648));
    }

    #[test]
    fn unsupported_pairs_fail() {
        let err = convert("1", PrimitiveKind::Int, PrimitiveKind::Bool).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    #[test]
    fn unknown_kind_lists_the_valid_ones() {
        let msg = kind("decimal").unwrap_err();
        assert!(msg.starts_with("unknown kind 'decimal'. Valid: bool"));
    }
}

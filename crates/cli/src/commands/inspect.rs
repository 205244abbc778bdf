use std::path::Path;
use std::process;

use optval_core::Value;

use crate::commands::fail;
use crate::input::{parse_value, read_input};
use crate::{report_error, InputFormat, OutputFormat};

pub(crate) fn cmd_inspect(
    input: Option<&Path>,
    format: InputFormat,
    output: OutputFormat,
    quiet: bool,
) {
    let text = match read_input(input) {
        Ok(t) => t,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let value = match parse_value(&text, format) {
        Ok(v) => v,
        Err(err) => fail(&err, output, quiet),
    };
    if quiet {
        return;
    }

    let fields = describe_fields(&value);
    match output {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = fields
                .iter()
                .map(|(name, ty, shown)| {
                    serde_json::json!({ "name": name, "type": ty, "value": shown })
                })
                .collect();
            let body = serde_json::json!({
                "type": value.ty().friendly_name(),
                "fields": rows,
            });
            let json = serde_json::to_string_pretty(&body)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", value.ty());
            for (name, ty, shown) in &fields {
                println!("  {} ({}) = {}", name, ty, shown);
            }
        }
    }
}

/// Name, declared type and display text of each field, in name order.
fn describe_fields(value: &Value) -> Vec<(String, String, String)> {
    value
        .field_names()
        .into_iter()
        .filter_map(|name| {
            let field = value.get_field(name).ok()?;
            Some((
                name.to_string(),
                field.ty().friendly_name(),
                field.to_string(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_listed_in_name_order() {
        let form = Value::map_string([
            ("name", Value::string("gorpher")),
            ("age", Value::int(24)),
        ])
        .unwrap();
        assert_eq!(
            describe_fields(&form),
            vec![
                ("age".to_string(), "int".to_string(), "24".to_string()),
                ("name".to_string(), "string".to_string(), "gorpher".to_string()),
            ]
        );
    }
}

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use optval_core::{Value, ValueResult};
use optval_interchange::{form_value, json_value};

use crate::InputFormat;

/// Read a document from a file, or from stdin when the path is absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .map_err(|e| format!("error reading '{}': {}", p.display(), e)),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("error reading stdin: {}", e))?;
            Ok(text)
        }
    }
}

pub(crate) fn parse_value(text: &str, format: InputFormat) -> ValueResult<Value> {
    match format {
        InputFormat::Form => form_value(text.trim_end_matches(['\r', '\n'])),
        InputFormat::Json => json_value(text),
    }
}

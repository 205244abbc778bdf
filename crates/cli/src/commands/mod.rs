pub(crate) mod check;
pub(crate) mod convert;
pub(crate) mod inspect;

use std::process;

use optval_core::{Value, ValueError};
use optval_interchange::BadRequest;

use crate::OutputFormat;

/// Report a pipeline failure as a bad request and exit 1.
///
/// JSON output prints the bad-request body on stdout; text output prints
/// the message on stderr.
pub(crate) fn fail(err: &ValueError, output: OutputFormat, quiet: bool) -> ! {
    let body = BadRequest::from_error(err);
    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&body)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{} bad request ({}): {}", body.status, body.kind, body.message);
            }
        }
    }
    process::exit(1);
}

/// JSON form of a map value, for embedding in command output.
pub(crate) fn value_json(value: &Value) -> Result<serde_json::Value, ValueError> {
    let bytes = value.converter().to_json_bytes()?;
    serde_json::from_slice(&bytes).map_err(|e| ValueError::InvalidInput {
        message: e.to_string(),
    })
}

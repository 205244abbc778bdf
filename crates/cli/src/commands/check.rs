use std::path::Path;
use std::process;

use optval_core::Value;
use optval_pipeline::{ProcessorSet, ValidatorSet, ValuePipeline};
use tracing::debug;

use crate::commands::{fail, value_json};
use crate::input::{parse_value, read_input};
use crate::rules::Rules;
use crate::{report_error, InputFormat, OutputFormat};

pub(crate) fn cmd_check(
    rules_path: &Path,
    input: Option<&Path>,
    format: InputFormat,
    output: OutputFormat,
    quiet: bool,
) {
    // Step 1: Load the rules file
    let rules = match Rules::load(rules_path) {
        Ok(r) => r,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let (validators, processors) = match (rules.validators(), rules.processors()) {
        (Ok(v), Ok(p)) => (v, p),
        (Err(msg), _) | (_, Err(msg)) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    // Step 2: Decode the input document
    let text = match read_input(input) {
        Ok(t) => t,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    // Step 3: Validate, then process
    let mut result = parse_value(&text, format);
    if !validators.is_empty() {
        debug!(validators = validators.len(), "validating input");
        result = result.validates(validators).map(ValidatorSet::into_value);
    }
    if !processors.is_empty() {
        debug!(processors = processors.len(), "processing input");
        result = result.processors(processors).map(ProcessorSet::into_value);
    }

    match result.and_then(|v| value_json(&v).map(|json| (v, json))) {
        Ok((value, json)) => print_value(&value, json, output, quiet),
        Err(err) => fail(&err, output, quiet),
    }
}

fn print_value(value: &Value, json: serde_json::Value, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let body = serde_json::json!({ "status": 200, "value": json });
            let text = serde_json::to_string_pretty(&body)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", text);
        }
        OutputFormat::Text => match value.converter().to_string() {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("{}", e),
        },
    }
}

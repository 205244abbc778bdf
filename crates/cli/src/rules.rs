//! The TOML rules file driving `optval check`.
//!
//! ```toml
//! [[validate]]
//! field = "age"
//! rules = ["numeric"]
//!
//! [[process]]
//! field = "age"
//! steps = ["to_int"]
//! ```
//!
//! Rules and steps are written `name` or `name:argument`.

use std::fs;
use std::path::Path;

use optval_core::PrimitiveKind;
use optval_pipeline::{applies, matches, process, validate, Apply, Match, Processor, Validator};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Rules {
    #[serde(default)]
    pub validate: Vec<FieldRules>,
    #[serde(default)]
    pub process: Vec<FieldSteps>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FieldRules {
    pub field: String,
    #[serde(default)]
    pub rules: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FieldSteps {
    pub field: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Rules {
    pub fn load(path: &Path) -> Result<Rules, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("error reading '{}': {}", path.display(), e))?;
        Rules::parse(&text).map_err(|e| format!("{}: {}", path.display(), e))
    }

    pub fn parse(text: &str) -> Result<Rules, String> {
        toml::from_str(text).map_err(|e| format!("invalid rules file: {}", e))
    }

    pub fn validators(&self) -> Result<Vec<Validator>, String> {
        self.validate
            .iter()
            .map(|entry| {
                let matches = entry
                    .rules
                    .iter()
                    .map(|text| rule(text).map_err(|e| format!("field {}: {}", entry.field, e)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(validate(entry.field.clone(), matches))
            })
            .collect()
    }

    pub fn processors(&self) -> Result<Vec<Processor>, String> {
        self.process
            .iter()
            .map(|entry| {
                let applies = entry
                    .steps
                    .iter()
                    .map(|text| step(text).map_err(|e| format!("field {}: {}", entry.field, e)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(process(entry.field.clone(), applies))
            })
            .collect()
    }
}

fn split(text: &str) -> (&str, Option<&str>) {
    match text.split_once(':') {
        Some((name, arg)) => (name.trim(), Some(arg)),
        None => (text.trim(), None),
    }
}

fn needs_arg<'s>(name: &str, arg: Option<&'s str>) -> Result<&'s str, String> {
    arg.ok_or_else(|| format!("'{}' needs an argument ({}:<value>)", name, name))
}

fn no_arg<T>(name: &str, arg: Option<&str>, built: T) -> Result<T, String> {
    match arg {
        None => Ok(built),
        Some(_) => Err(format!("'{}' takes no argument", name)),
    }
}

/// Build the predicate named by `text`.
pub(crate) fn rule(text: &str) -> Result<Match, String> {
    let (name, arg) = split(text);
    match name {
        "suffix" => Ok(matches::must_have_suffix(needs_arg(name, arg)?)),
        "contains" => Ok(matches::must_contain(needs_arg(name, arg)?)),
        "equals" => Ok(matches::must_equal(needs_arg(name, arg)?)),
        "in" => {
            let options = needs_arg(name, arg)?.split(',').map(str::trim);
            Ok(matches::must_be_in(options))
        }
        "not_null" => no_arg(name, arg, matches::must_not_null()),
        "string" => no_arg(name, arg, matches::must_be_string()),
        "true" => no_arg(name, arg, matches::must_be_true()),
        "has_symbol" => no_arg(name, arg, matches::must_have_symbol()),
        "has_digit" => no_arg(name, arg, matches::must_have_digit()),
        "has_letter" => no_arg(name, arg, matches::must_have_letter()),
        "has_lower" => no_arg(name, arg, matches::must_have_lower()),
        "has_upper" => no_arg(name, arg, matches::must_have_upper()),
        "lower" => no_arg(name, arg, matches::must_be_lower()),
        "upper" => no_arg(name, arg, matches::must_be_upper()),
        "letter" => no_arg(name, arg, matches::must_be_letter()),
        "digit" => no_arg(name, arg, matches::must_be_digit()),
        "lower_or_digit" => no_arg(name, arg, matches::must_be_lower_or_digit()),
        "upper_or_digit" => no_arg(name, arg, matches::must_be_upper_or_digit()),
        "letter_or_digit" => no_arg(name, arg, matches::must_be_letter_or_digit()),
        "han" => no_arg(name, arg, matches::must_be_han()),
        "url" => no_arg(name, arg, matches::must_be_url()),
        "uuid" => no_arg(name, arg, matches::must_be_uuid()),
        "sql_identifier" => no_arg(name, arg, matches::must_be_sql_identifier()),
        "ip" => no_arg(name, arg, matches::must_be_ip()),
        "json" => no_arg(name, arg, matches::must_be_json()),
        "numeric" => no_arg(name, arg, matches::must_be_numeric()),
        _ => Err(format!("unknown rule '{}'", name)),
    }
}

/// Build the transform named by `text`.
pub(crate) fn step(text: &str) -> Result<Apply, String> {
    let (name, arg) = split(text);
    match name {
        "trim" => Ok(applies::trim(needs_arg(name, arg)?)),
        "trim_left" => Ok(applies::trim_left(needs_arg(name, arg)?)),
        "trim_right" => Ok(applies::trim_right(needs_arg(name, arg)?)),
        "trim_prefix" => Ok(applies::trim_prefix(needs_arg(name, arg)?)),
        "trim_suffix" => Ok(applies::trim_suffix(needs_arg(name, arg)?)),
        "to" => {
            let kind = needs_arg(name, arg)?.trim();
            PrimitiveKind::from_name(kind)
                .map(applies::to_kind)
                .ok_or_else(|| format!("unknown kind '{}'", kind))
        }
        "upper" => no_arg(name, arg, applies::to_upper()),
        "lower" => no_arg(name, arg, applies::to_lower()),
        "trim_space" => no_arg(name, arg, applies::trim_space()),
        "remove_space" => no_arg(name, arg, applies::remove_space()),
        "base64" => no_arg(name, arg, applies::base64_encode()),
        "to_int" => no_arg(name, arg, applies::to_int()),
        "identity" => no_arg(name, arg, applies::identity()),
        _ => Err(format!("unknown step '{}'", name)),
    }
}

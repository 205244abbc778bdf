//! Fluent pipelines over values and over earlier results.
//!
//! [`ValuePipeline`] is implemented for `Value` and for `ValueResult<Value>`,
//! so a chain can begin from a fallible construction such as
//! `Value::map_string`. An `Err` passes through every stage unchanged.

use optval_core::{Value, ValueResult};

use crate::processor::{Processor, ProcessorSet};
use crate::validator::{Match, Validator, ValidatorSet};

pub trait ValuePipeline: Sized {
    fn into_result(self) -> ValueResult<Value>;

    /// Check this value as `field` and pass it on.
    fn validate(
        self,
        field: impl Into<String>,
        matches: impl IntoIterator<Item = Match>,
    ) -> ValueResult<Value> {
        let value = self.into_result()?;
        crate::validate(field, matches).run(value)
    }

    fn validates(self, validators: impl IntoIterator<Item = Validator>) -> ValueResult<ValidatorSet> {
        ValidatorSet::new(self.into_result()?, validators)
    }

    /// Transform this value as `field`.
    fn process(
        self,
        field: impl Into<String>,
        applies: impl IntoIterator<Item = crate::Apply>,
    ) -> ValueResult<Value> {
        let value = self.into_result()?;
        crate::process(field, applies).run(value)
    }

    fn processors(self, processors: impl IntoIterator<Item = Processor>) -> ValueResult<ProcessorSet> {
        ProcessorSet::new(self.into_result()?, processors)
    }
}

impl ValuePipeline for Value {
    fn into_result(self) -> ValueResult<Value> {
        Ok(self)
    }
}

impl ValuePipeline for ValueResult<Value> {
    fn into_result(self) -> ValueResult<Value> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applies::to_upper;
    use crate::matches::must_have_letter;
    use optval_core::ValueError;

    #[test]
    fn plain_values_chain() {
        let out = Value::string("abc")
            .validate("name", [must_have_letter()])
            .process("name", [to_upper()])
            .unwrap();
        assert_eq!(out, Value::string("ABC"));
    }

    #[test]
    fn errors_pass_through_untouched() {
        let failed: ValueResult<Value> = Err(ValueError::EmptyMap);
        let err = failed
            .process("name", [to_upper()])
            .validate("name", [must_have_letter()])
            .unwrap_err();
        assert_eq!(err, ValueError::EmptyMap);
    }

    #[test]
    fn failed_construction_reaches_the_set() {
        let fields: Vec<(String, Value)> = Vec::new();
        let err = Value::map_string(fields)
            .validates([crate::validate("a", [])])
            .unwrap_err();
        assert_eq!(err, ValueError::EmptyMap);
    }
}

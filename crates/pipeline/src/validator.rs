//! Validators and validator sets.
//!
//! A [`Validator`] runs an ordered list of [`Match`] predicates against one
//! value and stops at the first failure. A [`ValidatorSet`] checks named
//! fields of a map value; every named field must be present.

use std::fmt;

use optval_core::{Align, Target, Value, ValueError, ValueResult};
use tracing::{debug, trace};

use crate::processor::{Processor, ProcessorSet};

/// A predicate over a field name and its value.
pub struct Match {
    check: Box<dyn Fn(&str, &Value) -> ValueResult<()>>,
}

impl Match {
    pub fn new(check: impl Fn(&str, &Value) -> ValueResult<()> + 'static) -> Self {
        Match {
            check: Box::new(check),
        }
    }

    pub fn check(&self, field: &str, value: &Value) -> ValueResult<()> {
        (self.check)(field, value)
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Match")
    }
}

/// Ordered predicates for one named field.
#[derive(Debug)]
pub struct Validator {
    field: String,
    matches: Vec<Match>,
}

/// Build a validator for `field`.
pub fn validate(field: impl Into<String>, matches: impl IntoIterator<Item = Match>) -> Validator {
    Validator {
        field: field.into(),
        matches: matches.into_iter().collect(),
    }
}

impl Validator {
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Run every predicate in order; the first failure is returned.
    pub fn check(&self, value: &Value) -> ValueResult<()> {
        for m in &self.matches {
            m.check(&self.field, value)?;
        }
        Ok(())
    }

    /// Check `value` and hand it back unchanged on success.
    pub fn run(&self, value: Value) -> ValueResult<Value> {
        self.check(&value)?;
        Ok(value)
    }

    /// Check `value`, then write it into `target`.
    pub fn align<'a>(&self, value: &Value, target: impl Into<Target<'a>>) -> ValueResult<()> {
        self.check(value)?;
        value.align(target)
    }
}

// ──────────────────────────────────────────────
// Validator set
// ──────────────────────────────────────────────

/// A map value whose named fields passed their validators.
#[derive(Debug)]
pub struct ValidatorSet {
    value: Value,
    validators: Vec<Validator>,
}

impl ValidatorSet {
    /// Check the named fields of a map value.
    ///
    /// Presence is checked for every validator before any predicate runs:
    /// an absent field fails the whole set with `MissingField`. Validators
    /// then run in order and the first failing field's error is returned.
    pub fn new(
        value: Value,
        validators: impl IntoIterator<Item = Validator>,
    ) -> ValueResult<ValidatorSet> {
        value.reject_null()?;
        if !value.is_map_value() {
            return Err(ValueError::type_mismatch("map", value.ty().friendly_name()));
        }
        if value.ty().is_empty() {
            return Err(ValueError::EmptyMap);
        }
        let validators: Vec<Validator> = validators.into_iter().collect();
        debug!(validators = validators.len(), "checking validator set");

        let mut fields = Vec::with_capacity(validators.len());
        for validator in &validators {
            fields.push(required_field(&value, validator.field())?);
        }

        for (validator, field) in validators.iter().zip(&fields) {
            trace!(field = validator.field(), "validating field");
            if let Err(err) = validator.check(field) {
                debug!(field = validator.field(), error = %err, "validation failed");
                return Err(err);
            }
        }
        Ok(ValidatorSet { value, validators })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Names of the fields this set checked, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(Validator::field)
    }

    pub fn align(&self, align: Align<'_>) -> ValueResult<()> {
        self.aligns([align])
    }

    /// Write validated fields into their targets.
    ///
    /// Each field is re-checked by every validator registered for it before
    /// it is written. Fields this set did not validate are reported as
    /// `FieldNotFound`.
    pub fn aligns<'a>(&self, aligns: impl IntoIterator<Item = Align<'a>>) -> ValueResult<()> {
        for Align { field, target } in aligns {
            let validators: Vec<&Validator> = self
                .validators
                .iter()
                .filter(|v| v.field() == field)
                .collect();
            if validators.is_empty() {
                return Err(ValueError::FieldNotFound { field });
            }
            let value = self.value.get_field(&field)?;
            for validator in validators {
                validator.check(&value)?;
            }
            value.align(target)?;
        }
        Ok(())
    }

    /// Continue the chain with a processor set over the validated map.
    pub fn processors(
        self,
        processors: impl IntoIterator<Item = Processor>,
    ) -> ValueResult<ProcessorSet> {
        ProcessorSet::new(self.value, processors)
    }
}

/// Look up a field a set depends on. An absent field and a field holding
/// null are both `MissingField`.
pub(crate) fn required_field(value: &Value, field: &str) -> ValueResult<Value> {
    match value.get_field(field) {
        Ok(found) if found.is_null() => Err(missing(field.to_string())),
        Ok(found) => Ok(found),
        Err(ValueError::FieldNotFound { field }) => Err(missing(field)),
        Err(other) => Err(other),
    }
}

fn missing(field: String) -> ValueError {
    debug!(field = %field, "required field missing");
    ValueError::MissingField { field }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::matches::{must_be_numeric, must_have_letter, must_not_null};
    use optval_core::{align, ErrorKind, PrimitiveKind, Type};

    fn form() -> Value {
        Value::map_string([
            ("author", Value::string("gorpher")),
            ("age", Value::string("24")),
        ])
        .unwrap()
    }

    fn counting(counter: &Rc<Cell<usize>>) -> Match {
        let counter = Rc::clone(counter);
        Match::new(move |_, _| {
            counter.set(counter.get() + 1);
            Ok(())
        })
    }

    fn always_fail(reason: &'static str) -> Match {
        Match::new(move |field, _| Err(ValueError::validation(field, reason)))
    }

    #[test]
    fn predicates_short_circuit_in_order() {
        let counter = Rc::new(Cell::new(0));
        let v = validate(
            "name",
            [counting(&counter), always_fail("is wrong"), counting(&counter)],
        );
        let err = v.check(&Value::string("x")).unwrap_err();
        assert_eq!(err, ValueError::validation("name", "is wrong"));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn run_returns_the_value() {
        let v = validate("name", [must_not_null()]);
        assert_eq!(v.run(Value::string("x")).unwrap(), Value::string("x"));
    }

    #[test]
    fn validator_align_checks_first() {
        let mut n: i64 = 0;
        let v = validate("age", [must_be_numeric()]);
        v.align(&Value::string("41"), &mut n).unwrap();
        assert_eq!(n, 41);
        let err = v.align(&Value::string("old"), &mut n).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(n, 41);
    }

    #[test]
    fn set_passes_and_aligns() {
        let set = ValidatorSet::new(
            form(),
            [
                validate("author", [must_have_letter()]),
                validate("age", [must_be_numeric()]),
            ],
        )
        .unwrap();
        assert_eq!(set.value(), &form());
        assert_eq!(set.fields().collect::<Vec<_>>(), vec!["author", "age"]);

        let mut age: i64 = 0;
        set.align(align("age", &mut age)).unwrap();
        assert_eq!(age, 24);
    }

    #[test]
    fn missing_field_fails_before_any_predicate() {
        let counter = Rc::new(Cell::new(0));
        let form = Value::map_string([("author", Value::string("gorpher"))]).unwrap();
        let err = ValidatorSet::new(
            form,
            [
                validate("author", [counting(&counter)]),
                validate("age", [counting(&counter)]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValueError::MissingField {
                field: "age".to_string()
            }
        );
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn first_failing_field_wins() {
        let counter = Rc::new(Cell::new(0));
        let err = ValidatorSet::new(
            form(),
            [
                validate("author", [always_fail("first")]),
                validate("age", [always_fail("second")]),
                validate("age", [counting(&counter)]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ValueError::validation("author", "first"));
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn empty_and_non_map_values_are_rejected() {
        let err = ValidatorSet::new(Value::empty_map(), [validate("a", [])]).unwrap_err();
        assert_eq!(err, ValueError::EmptyMap);
        let err = ValidatorSet::new(Value::int(1), [validate("a", [])]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn null_maps_are_a_null_operation() {
        let null_form = Value::null(form().ty().clone());
        let err = ValidatorSet::new(null_form, [validate("age", [])]).unwrap_err();
        assert_eq!(
            err,
            ValueError::NullOperation {
                ty: "map of [(age=string)(author=string)]".to_string()
            }
        );
        let err =
            ValidatorSet::new(optval_core::sentinel::null().clone(), [validate("a", [])])
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullOperation);
    }

    #[test]
    fn null_field_counts_as_missing() {
        let counter = Rc::new(Cell::new(0));
        let form = Value::map_string([
            ("age", Value::null(Type::from(PrimitiveKind::String))),
            ("a", Value::string("x")),
        ])
        .unwrap();
        let err = ValidatorSet::new(
            form,
            [
                validate("a", [counting(&counter)]),
                validate("age", [must_be_numeric()]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValueError::MissingField {
                field: "age".to_string()
            }
        );
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn align_rechecks_every_validator_for_the_field() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let set = ValidatorSet::new(
            form(),
            [
                validate("age", [counting(&first)]),
                validate("author", [must_have_letter()]),
                validate("age", [counting(&second)]),
            ],
        )
        .unwrap();
        let mut age: i64 = 0;
        set.align(align("age", &mut age)).unwrap();
        assert_eq!(age, 24);
        assert_eq!((first.get(), second.get()), (2, 2));
    }

    #[test]
    fn align_stops_when_a_later_validator_fails() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let fails_on_recheck = Match::new(move |field, _| {
            seen.set(seen.get() + 1);
            if seen.get() > 1 {
                Err(ValueError::validation(field, "changed"))
            } else {
                Ok(())
            }
        });
        let set = ValidatorSet::new(
            form(),
            [
                validate("age", [must_be_numeric()]),
                validate("age", [fails_on_recheck]),
            ],
        )
        .unwrap();
        let mut age: i64 = 0;
        let err = set.align(align("age", &mut age)).unwrap_err();
        assert_eq!(err, ValueError::validation("age", "changed"));
        assert_eq!(age, 0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn aligning_an_unvalidated_field_is_refused() {
        let set = ValidatorSet::new(form(), [validate("age", [must_be_numeric()])]).unwrap();
        let mut author = String::new();
        let err = set.align(align("author", &mut author)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
        assert!(author.is_empty());
    }
}

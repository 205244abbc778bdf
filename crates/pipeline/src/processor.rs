//! Processors and processor sets.
//!
//! A [`Processor`] threads one value through an ordered list of [`Apply`]
//! transforms. A [`ProcessorSet`] runs processors over named fields of a map
//! value and writes each result back into the map.

use std::fmt;

use optval_core::{Align, Value, ValueError, ValueResult};
use tracing::{debug, trace};

use crate::validator::{required_field, Validator, ValidatorSet};

/// A transform from one value to its replacement.
pub struct Apply {
    apply: Box<dyn Fn(&str, Value) -> ValueResult<Value>>,
}

impl Apply {
    pub fn new(apply: impl Fn(&str, Value) -> ValueResult<Value> + 'static) -> Self {
        Apply {
            apply: Box::new(apply),
        }
    }

    pub fn apply(&self, field: &str, value: Value) -> ValueResult<Value> {
        (self.apply)(field, value)
    }
}

impl fmt::Debug for Apply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Apply")
    }
}

/// Ordered transforms for one named field.
#[derive(Debug)]
pub struct Processor {
    field: String,
    applies: Vec<Apply>,
}

/// Build a processor for `field`.
pub fn process(field: impl Into<String>, applies: impl IntoIterator<Item = Apply>) -> Processor {
    Processor {
        field: field.into(),
        applies: applies.into_iter().collect(),
    }
}

impl Processor {
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Thread `value` through every transform; the first failure stops the
    /// pipeline. Map values are not processed as a whole.
    pub fn run(&self, value: Value) -> ValueResult<Value> {
        if value.is_map_value() {
            return Err(ValueError::type_mismatch(
                "primitive",
                value.ty().friendly_name(),
            ));
        }
        self.applies
            .iter()
            .try_fold(value, |current, apply| apply.apply(&self.field, current))
    }
}

// ──────────────────────────────────────────────
// Processor set
// ──────────────────────────────────────────────

/// A map value rebuilt from its processed fields.
#[derive(Debug)]
pub struct ProcessorSet {
    value: Value,
}

impl ProcessorSet {
    /// Process the named fields of a map value.
    ///
    /// Every named field must be present before any transform runs. Each
    /// processor then reads its field's current value, so processors naming
    /// the same field compose in declaration order.
    pub fn new(
        value: Value,
        processors: impl IntoIterator<Item = Processor>,
    ) -> ValueResult<ProcessorSet> {
        value.reject_null()?;
        if !value.is_map_value() {
            return Err(ValueError::type_mismatch("map", value.ty().friendly_name()));
        }
        if value.ty().is_empty() {
            return Err(ValueError::EmptyMap);
        }
        let processors: Vec<Processor> = processors.into_iter().collect();
        debug!(processors = processors.len(), "running processor set");

        for processor in &processors {
            required_field(&value, processor.field())?;
        }

        let mut rebuilt = value;
        for processor in &processors {
            trace!(field = processor.field(), "processing field");
            let current = rebuilt.get_field(processor.field())?;
            let processed = processor.run(current).map_err(|err| {
                debug!(field = processor.field(), error = %err, "processing failed");
                err
            })?;
            rebuilt.set_field(processor.field(), processed)?;
        }
        Ok(ProcessorSet { value: rebuilt })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn align(&self, align: Align<'_>) -> ValueResult<()> {
        self.value.aligns([align])
    }

    pub fn aligns<'a>(&self, aligns: impl IntoIterator<Item = Align<'a>>) -> ValueResult<()> {
        self.value.aligns(aligns)
    }

    /// Continue the chain with a validator set over the rebuilt map.
    pub fn validates(
        self,
        validators: impl IntoIterator<Item = Validator>,
    ) -> ValueResult<ValidatorSet> {
        ValidatorSet::new(self.value, validators)
    }
}

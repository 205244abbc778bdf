//! optval-pipeline: validation and processing over optval values.
//!
//! Validators check fields with ordered [`Match`] predicates; processors
//! rewrite fields with ordered [`Apply`] transforms. Sets of either operate
//! on map values, require every named field to be present, and stop at the
//! first failure.

pub mod applies;
pub mod chain;
pub mod matches;
pub mod processor;
pub mod validator;

pub use chain::ValuePipeline;
pub use processor::{process, Apply, Processor, ProcessorSet};
pub use validator::{validate, Match, Validator, ValidatorSet};

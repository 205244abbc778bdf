//! Error taxonomy shared by every optval crate.
//!
//! Errors are created once, at the stage that detects them, and travel
//! unchanged through every later stage of a pipeline.

/// Result alias used across the workspace.
pub type ValueResult<T> = Result<T, ValueError>;

/// Coarse classification of a [`ValueError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Conversion,
    TypeMismatch,
    EmptyMap,
    FieldNotFound,
    MissingField,
    NullOperation,
    InvalidTarget,
    ValidationFailed,
    InvalidInput,
}

impl ErrorKind {
    /// Stable snake_case name, used in serialized error reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Conversion => "conversion_error",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::EmptyMap => "empty_map",
            ErrorKind::FieldNotFound => "field_not_found",
            ErrorKind::MissingField => "missing_field",
            ErrorKind::NullOperation => "null_operation",
            ErrorKind::InvalidTarget => "invalid_target",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::InvalidInput => "invalid_input",
        }
    }
}

/// All errors produced while building, converting, checking, transforming
/// or aligning values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The requested representation cannot be produced from the declared type.
    #[error("this type conversion is not supported: {from} to {to}")]
    Conversion { from: String, to: String },

    /// The payload's runtime shape disagrees with the declared type tag.
    #[error("payload does not match declared type {declared}: found {found}")]
    TagMismatch { declared: String, found: String },

    /// Text could not be parsed into the requested representation.
    #[error("cannot parse {input:?} as {to}: {message}")]
    Parse {
        input: String,
        to: String,
        message: String,
    },

    /// A map holding NaN or an infinity was asked for its JSON encoding.
    #[error("field {field} holds a non-finite float and cannot be encoded as JSON")]
    NonFiniteJson { field: String },

    /// An operation was invoked on a type or value of the wrong shape.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A map value was built or checked with zero fields.
    #[error("map value must have at least one field")]
    EmptyMap,

    /// A requested map field does not exist.
    #[error("field {field} not found")]
    FieldNotFound { field: String },

    /// A field required by a validator or processor set is absent.
    #[error("no {field} field present to check")]
    MissingField { field: String },

    /// An operation other than type inspection was attempted on a null value.
    #[error("operation on a null {ty} value")]
    NullOperation { ty: String },

    /// An alignment output location is nil or cannot be written.
    #[error("invalid alignment target: {expected} reference is not settable")]
    InvalidTarget { expected: String },

    /// A validation predicate rejected a field.
    #[error("field {field} {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Raw input could not be turned into a value at all.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::Conversion { .. }
            | ValueError::TagMismatch { .. }
            | ValueError::Parse { .. }
            | ValueError::NonFiniteJson { .. } => ErrorKind::Conversion,
            ValueError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ValueError::EmptyMap => ErrorKind::EmptyMap,
            ValueError::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            ValueError::MissingField { .. } => ErrorKind::MissingField,
            ValueError::NullOperation { .. } => ErrorKind::NullOperation,
            ValueError::InvalidTarget { .. } => ErrorKind::InvalidTarget,
            ValueError::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            ValueError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        ValueError::ValidationFailed {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ValueError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_conversion_errors() {
        let err = ValueError::Parse {
            input: "abc".to_string(),
            to: "int".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(
            err.to_string(),
            "cannot parse \"abc\" as int: invalid digit found in string"
        );
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = ValueError::validation("author", "must contain a letter");
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.to_string(), "field author must contain a letter");
    }
}

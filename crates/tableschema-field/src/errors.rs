//! Field error types
//!
//! This module defines the errors raised while casting a raw value and
//! checking it against the constraints of a field descriptor.

use crate::constraints::Constraint;
use thiserror::Error;

// ============================================================================
// Results
// ============================================================================

/// Result type for field operations and constraint evaluators
pub type FieldResult<T> = Result<T, FieldError>;

/// Result type for type casters
pub type CastResult<T> = Result<T, CastError>;

// ============================================================================
// Field Error
// ============================================================================

/// Error raised by `Field::cast_value` and the constraint evaluators
///
/// Evaluation is fail-fast: the first failing cast step or constraint is
/// returned and the remaining constraints are not checked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// A required field received an absent or null-equivalent value
    #[error("The field \"{name}\" requires a value")]
    FieldRequired { name: String },

    /// Length, bound or pattern mismatch
    #[error("{message}")]
    ConstraintViolation {
        constraint: Constraint,
        message: String,
    },

    /// A constraint was evaluated against a value kind it does not support
    #[error("Unsupported type of value")]
    UnsupportedType {
        constraint: Constraint,
        value_type: &'static str,
    },

    /// The constraint can never be checked at field level
    #[error("{} constraint is not supported", capitalize(.constraint.name()))]
    UnsupportedConstraint { constraint: Constraint },

    /// The `pattern` argument is not a `/body/flags` regular expression
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A constraint argument has the wrong shape (e.g. a negative length)
    #[error("Invalid argument for constraint '{}': {reason}", .constraint.name())]
    InvalidArgument {
        constraint: Constraint,
        reason: String,
    },

    /// The raw value could not be cast to the declared type
    #[error(transparent)]
    Cast(#[from] CastError),

    /// The descriptor could not be parsed
    #[error("Invalid field descriptor: {0}")]
    Descriptor(String),
}

impl FieldError {
    /// Build a constraint violation with its contract message
    pub fn violation(constraint: Constraint, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            constraint,
            message: message.into(),
        }
    }

    /// The constraint that produced this error, if any
    pub fn constraint(&self) -> Option<Constraint> {
        match self {
            Self::FieldRequired { .. } => Some(Constraint::Required),
            Self::ConstraintViolation { constraint, .. }
            | Self::UnsupportedType { constraint, .. }
            | Self::UnsupportedConstraint { constraint }
            | Self::InvalidArgument { constraint, .. } => Some(*constraint),
            Self::InvalidPattern { .. } => Some(Constraint::Pattern),
            Self::Cast(_) | Self::Descriptor(_) => None,
        }
    }

    /// Returns true if the error comes from the data rather than the schema
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::FieldRequired { .. } | Self::ConstraintViolation { .. } | Self::Cast(CastError::InvalidValue { .. })
        )
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        FieldError::Descriptor(err.to_string())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Cast Error
// ============================================================================

/// Error raised by a type caster
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    /// The raw value is not a valid representation of the type
    #[error("Value '{value}' cannot be cast to {type_name} ({format})")]
    InvalidValue {
        type_name: String,
        format: String,
        value: String,
    },

    /// The type does not know the requested format
    #[error("Format '{format}' is not supported for type {type_name}")]
    UnsupportedFormat { type_name: String, format: String },

    /// No caster is registered for the declared type
    #[error("Unknown field type '{0}'")]
    UnknownType(String),
}

impl CastError {
    /// Create an invalid value error
    pub fn invalid(type_name: &str, format: &str, value: impl ToString) -> Self {
        Self::InvalidValue {
            type_name: type_name.to_string(),
            format: format.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(type_name: &str, format: &str) -> Self {
        Self::UnsupportedFormat {
            type_name: type_name.to_string(),
            format: format.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message() {
        let err = FieldError::FieldRequired {
            name: "id".to_string(),
        };
        assert_eq!(err.to_string(), "The field \"id\" requires a value");
        assert_eq!(err.constraint(), Some(Constraint::Required));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_unsupported_constraint_message() {
        let err = FieldError::UnsupportedConstraint {
            constraint: Constraint::Unique,
        };
        assert_eq!(err.to_string(), "Unique constraint is not supported");
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_unsupported_type_message() {
        let err = FieldError::UnsupportedType {
            constraint: Constraint::Minimum,
            value_type: "object",
        };
        assert_eq!(err.to_string(), "Unsupported type of value");
    }

    #[test]
    fn test_cast_error_is_transparent() {
        let err: FieldError = CastError::invalid("integer", "default", "abc").into();
        assert_eq!(
            err.to_string(),
            "Value 'abc' cannot be cast to integer (default)"
        );
        assert_eq!(err.constraint(), None);

        let err: FieldError = CastError::UnknownType("geopoint".to_string()).into();
        assert!(!err.is_data_error());
    }
}

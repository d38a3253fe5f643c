//! Validation utilities.

use crate::SchoolError;
use validator::{Validate, ValidationErrors};

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `SchoolError` on failure.
    fn validate_request(&self) -> Result<(), SchoolError> {
        self.validate().map_err(|e| validation_errors_to_school_error(&e))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors, sorted by field
/// name so that messages are stable.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Converts `validator::ValidationErrors` to `SchoolError`.
#[must_use]
pub fn validation_errors_to_school_error(errors: &ValidationErrors) -> SchoolError {
    let message = field_errors(errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    SchoolError::Validation(message)
}

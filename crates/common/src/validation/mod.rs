// Validation Module - field-level validation with collected errors
use std::fmt;

mod validators;

pub use validators::{EmailValidator, FieldValidator, RequiredValidator};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Add a field error with code
    pub fn add_error_with_code(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) {
        self.errors.push(FieldError::new(field, message).with_code(code));
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Get errors for a specific field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Drop every error recorded against `field`.
    pub fn clear_field(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    /// Merge another validation error into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    /// `Ok(())` when no errors were collected, otherwise `Err(self)`.
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "Validation error with no specific field errors")?;
        } else if self.errors.len() == 1 {
            write!(f, "Validation failed: {}", self.errors[0].message)?;
        } else {
            write!(f, "Validation failed with {} errors: ", self.errors.len())?;
            for (i, error) in self.errors.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", error.field, error.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Individual field error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: Option<String>,
}

impl FieldError {
    /// Create a new field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into(), code: None }
    }

    /// Set error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Runs validators field by field and collects every failure.
///
/// There is no short-circuiting: a form with three bad fields reports all
/// three in one pass.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a field with a specific validator.
    ///
    /// Returns `true` when the value passed, so callers can chain dependent
    /// checks (e.g. only check the email shape once it is present).
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V) -> bool
    where
        T: ?Sized,
        V: FieldValidator<T> + ?Sized,
    {
        match validator.validate(value) {
            Ok(()) => true,
            Err(message) => {
                self.errors.add_error_with_code(field, message, validator.code());
                false
            }
        }
    }

    /// Finish validation and return collected errors, if any.
    pub fn finish(self) -> ValidationResult<()> {
        self.errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_errors_without_short_circuit() {
        let mut validator = Validator::new();
        let required = RequiredValidator::new("Name is required");

        assert!(!validator.validate_field("name", "", &required));
        assert!(!validator.validate_field("company", "   ", &required));
        assert!(validator.validate_field("phone", "555", &required));

        let err = validator.finish().unwrap_err();
        assert_eq!(err.error_count(), 2);
        assert_eq!(err.field_errors("company").len(), 1);
        assert_eq!(err.errors[0].code.as_deref(), Some("missing_field"));
    }

    #[test]
    fn clear_field_removes_only_that_field() {
        let mut err = ValidationError::field("name", "Name is required");
        err.add_field_error("email", "Email is invalid");

        err.clear_field("name");

        assert_eq!(err.error_count(), 1);
        assert_eq!(err.errors[0].field, "email");
    }

    #[test]
    fn display_lists_every_field() {
        let mut err = ValidationError::field("name", "Name is required");
        err.add_field_error("email", "Email is invalid");

        let text = err.to_string();
        assert!(text.contains("2 errors"));
        assert!(text.contains("name: Name is required"));
        assert!(text.contains("email: Email is invalid"));
    }

    #[test]
    fn empty_error_converts_to_ok() {
        assert!(ValidationError::new().into_result().is_ok());
    }
}

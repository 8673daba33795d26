// Field Validators - Reusable validation components
use once_cell::sync::Lazy;
use regex::Regex;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;

    /// Stable machine-readable code attached to failures.
    fn code(&self) -> &'static str {
        "invalid"
    }
}

/// Rejects empty or whitespace-only strings.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Create a required-field validator reporting `message` on failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl FieldValidator<str> for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            return Err(self.message.clone());
        }
        Ok(())
    }

    fn code(&self) -> &'static str {
        "missing_field"
    }
}

/// Static email regex pattern compiled once at first use.
///
/// Deliberately loose: some non-space text, an `@`, and a dotted domain
/// anywhere in the value.
#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("EMAIL_REGEX pattern is valid"));

/// Email validator
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailValidator {
    /// Create a new email validator
    pub fn new() -> Self {
        Self { message: "Invalid email format".to_string() }
    }

    /// Override the failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if !EMAIL_REGEX.is_match(value) {
            return Err(self.message.clone());
        }

        Ok(())
    }

    fn code(&self) -> &'static str {
        "invalid_email_format"
    }
}

//! Step validation for the calculator wizard
//!
//! Contact validation reports every problem at once rather than stopping at
//! the first bad field.

use std::fmt;

use abacus_common::validation::{EmailValidator, FieldError, RequiredValidator, Validator};
use abacus_domain::{ContactField, ContactInfo, SpaceRequest};
use serde::Serialize;
use thiserror::Error;

const EMAIL_INVALID_MESSAGE: &str = "Email is invalid";

/// A single reason a wizard step can not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Every category has zero quantity.
    #[error("Please add at least one space requirement")]
    IncompleteConfiguration,

    #[error("{}", missing_message(.0))]
    MissingField(ContactField),

    #[error("{}", EMAIL_INVALID_MESSAGE)]
    InvalidEmailFormat,
}

impl ValidationIssue {
    /// Key of the input this issue belongs to (`space` for the step 1 banner).
    pub fn field_key(&self) -> &'static str {
        match self {
            Self::IncompleteConfiguration => "space",
            Self::MissingField(field) => field.key(),
            Self::InvalidEmailFormat => ContactField::Email.key(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::IncompleteConfiguration => "incomplete_configuration",
            Self::MissingField(_) => "missing_field",
            Self::InvalidEmailFormat => "invalid_email_format",
        }
    }

    fn from_field_error(error: &FieldError) -> Option<Self> {
        let field = ContactField::ALL.into_iter().find(|f| f.key() == error.field)?;
        match error.code.as_deref() {
            Some("missing_field") => Some(Self::MissingField(field)),
            Some("invalid_email_format") => Some(Self::InvalidEmailFormat),
            _ => None,
        }
    }
}

fn missing_message(field: &ContactField) -> &'static str {
    required_message(*field)
}

/// Required-field message shown under each contact input.
pub fn required_message(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name is required",
        ContactField::Company => "Company name is required",
        ContactField::Designation => "Designation is required",
        ContactField::Phone => "Phone number is required",
        ContactField::Email => "Email is required",
    }
}

/// All issues found for one step, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn contains(&self, issue: ValidationIssue) -> bool {
        self.0.contains(&issue)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ValidationIssue>> for ValidationErrors {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        Self(issues)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Step 1: at least one category must have a non-zero quantity.
pub fn validate_space(space: &SpaceRequest) -> Result<(), ValidationErrors> {
    if space.has_requirements() {
        Ok(())
    } else {
        Err(vec![ValidationIssue::IncompleteConfiguration].into())
    }
}

/// Step 2: every contact field is required and the email must look like
/// `text@text.text`.
pub fn validate_contact(contact: &ContactInfo) -> Result<(), ValidationErrors> {
    let email = EmailValidator::new().with_message(EMAIL_INVALID_MESSAGE);
    let mut validator = Validator::new();

    for field in ContactField::ALL {
        let value = contact.get(field);
        let present =
            validator.validate_field(field.key(), value, &RequiredValidator::new(required_message(field)));
        if present && field == ContactField::Email {
            validator.validate_field(field.key(), value, &email);
        }
    }

    validator.finish().map_err(|err| {
        err.errors.iter().filter_map(ValidationIssue::from_field_error).collect::<Vec<_>>().into()
    })
}

#[cfg(test)]
mod tests {
    use abacus_domain::Category;

    use super::*;

    fn complete_contact() -> ContactInfo {
        ContactInfo {
            name: "Asha Rao".into(),
            company: "Northwind".into(),
            designation: "COO".into(),
            phone: "98450 00000".into(),
            email: "a@b.co".into(),
        }
    }

    #[test]
    fn empty_space_is_incomplete() {
        let err = validate_space(&SpaceRequest::new()).unwrap_err();
        assert_eq!(err.issues(), &[ValidationIssue::IncompleteConfiguration]);
        assert_eq!(err.to_string(), "Please add at least one space requirement");
    }

    #[test]
    fn one_cabin_is_enough() {
        let mut space = SpaceRequest::new();
        space.set_quantity(Category::Cabins, 1);
        assert!(validate_space(&space).is_ok());
    }

    #[test]
    fn complete_contact_passes() {
        assert!(validate_contact(&complete_contact()).is_ok());
    }

    #[test]
    fn reports_every_missing_field_together() {
        let err = validate_contact(&ContactInfo::default()).unwrap_err();
        let expected: Vec<_> = ContactField::ALL.into_iter().map(ValidationIssue::MissingField).collect();
        assert_eq!(err.issues(), expected.as_slice());
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let contact = ContactInfo { company: "   ".into(), ..complete_contact() };
        let err = validate_contact(&contact).unwrap_err();
        assert_eq!(err.issues(), &[ValidationIssue::MissingField(ContactField::Company)]);
        assert_eq!(err.to_string(), "Company name is required");
    }

    #[test]
    fn malformed_email_is_invalid_format() {
        let contact = ContactInfo { email: "not-an-email".into(), ..complete_contact() };
        let err = validate_contact(&contact).unwrap_err();
        assert_eq!(err.issues(), &[ValidationIssue::InvalidEmailFormat]);
        assert_eq!(err.issues()[0].field_key(), "email");
    }

    #[test]
    fn missing_email_is_not_also_reported_as_malformed() {
        let contact = ContactInfo { email: String::new(), name: String::new(), ..complete_contact() };
        let err = validate_contact(&contact).unwrap_err();
        assert_eq!(
            err.issues(),
            &[
                ValidationIssue::MissingField(ContactField::Name),
                ValidationIssue::MissingField(ContactField::Email),
            ]
        );
        assert!(!err.contains(ValidationIssue::InvalidEmailFormat));
    }

    #[test]
    fn issue_codes_are_stable() {
        assert_eq!(ValidationIssue::IncompleteConfiguration.code(), "incomplete_configuration");
        assert_eq!(ValidationIssue::MissingField(ContactField::Phone).code(), "missing_field");
        assert_eq!(ValidationIssue::InvalidEmailFormat.code(), "invalid_email_format");
    }
}

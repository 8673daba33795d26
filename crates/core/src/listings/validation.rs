//! Listing form validation

use abacus_common::validation::{
    FieldValidator, RequiredValidator, ValidationError, ValidationResult, Validator,
};
use abacus_domain::ListingDraft;
use serde::Serialize;

/// Requires at least one non-blank entry.
struct AtLeastOne(&'static str);

impl FieldValidator<[String]> for AtLeastOne {
    fn validate(&self, values: &[String]) -> Result<(), String> {
        if values.iter().any(|v| !v.trim().is_empty()) {
            Ok(())
        } else {
            Err(self.0.to_string())
        }
    }

    fn code(&self) -> &'static str {
        "missing_field"
    }
}

/// Check a listing draft, reporting every bad field at once.
pub fn validate_listing(draft: &ListingDraft) -> ValidationResult<()> {
    let mut validator = Validator::new();

    validator.validate_field(
        "title",
        draft.title.as_str(),
        &RequiredValidator::new("Property title is required"),
    );
    validator.validate_field(
        "type",
        draft.kind.as_str(),
        &RequiredValidator::new("Type is required"),
    );
    validator.validate_field(
        "location",
        draft.location.as_str(),
        &RequiredValidator::new("Location must be selected"),
    );
    validator.validate_field(
        "area",
        draft.area.as_str(),
        &RequiredValidator::new("Area is required"),
    );
    validator.validate_field(
        "price",
        draft.price.as_str(),
        &RequiredValidator::new("Price is required"),
    );
    validator.validate_field(
        "features",
        draft.features.as_slice(),
        &AtLeastOne("At least one feature is required"),
    );
    validator.validate_field(
        "images",
        draft.images.as_slice(),
        &AtLeastOne("At least one image is required"),
    );

    validator.finish()
}

/// One rejected listing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub(crate) fn from_validation(err: ValidationError) -> Vec<Self> {
        err.errors.into_iter().map(|e| Self { field: e.field, message: e.message }).collect()
    }
}

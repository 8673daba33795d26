//! Office space calculator
//!
//! A three-step wizard: configure space → enter contact details → results.
//! Area figures are derived from the session's [`SpaceRequest`] on every
//! read, so the wizard never holds a total that can drift from its inputs.
//!
//! [`SpaceRequest`]: abacus_domain::SpaceRequest

mod input;
mod report;
mod validation;
mod wizard;

pub use input::parse_quantity;
pub use report::{breakdown, format_sqft, BreakdownLine, CalculationReport, SubmissionOutcome};
pub use validation::{
    required_message, validate_contact, validate_space, ValidationErrors, ValidationIssue,
};
pub use wizard::{SpaceCalculator, Step, WizardError};

//! # Abacus Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The office space calculator wizard and its validation policy
//! - Results breakdown and report rendering helpers
//! - Port interfaces (traits) for lead intake, the lead pipeline and listings
//! - Pipeline statistics
//! - Listing catalog maintenance and property report requests
//!
//! ## Architecture Principles
//! - Only depends on `abacus-common` and `abacus-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod calculator;
pub mod leads;
pub mod listings;

// Re-export specific items to avoid ambiguity
pub use calculator::{
    parse_quantity, BreakdownLine, CalculationReport, SpaceCalculator, Step, SubmissionOutcome,
    ValidationErrors, ValidationIssue, WizardError,
};
pub use leads::ports::{LeadDirectory, LeadIntake, SubmissionError};
pub use leads::{LeadPipelineService, PipelineOverview, PipelineStats};
pub use listings::ports::ListingDirectory;
pub use listings::{
    request_report, validate_listing, FieldIssue, ListingCatalogService, ListingWrite,
    ReportOutcome,
};

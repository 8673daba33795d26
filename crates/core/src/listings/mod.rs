//! Property listings
//!
//! Public browsing and back-office maintenance go through a
//! [`ListingDirectory`]; report requests for a single listing are captured as
//! leads through the same [`LeadIntake`] the calculator uses.
//!
//! [`ListingDirectory`]: ports::ListingDirectory
//! [`LeadIntake`]: crate::leads::ports::LeadIntake

pub mod ports;
mod report;
mod service;
mod validation;

pub use report::{request_report, ReportOutcome};
pub use service::{ListingCatalogService, ListingWrite};
pub use validation::{validate_listing, FieldIssue};

//! Lead intake and lead pipeline
//!
//! The calculator hands a finished [`LeadSubmission`] to a [`LeadIntake`];
//! back-office tooling reads and updates leads through a [`LeadDirectory`].
//!
//! [`LeadSubmission`]: abacus_domain::LeadSubmission
//! [`LeadIntake`]: ports::LeadIntake
//! [`LeadDirectory`]: ports::LeadDirectory

pub mod ports;
pub mod service;
pub mod stats;

pub use service::{LeadPipelineService, PipelineOverview};
pub use stats::PipelineStats;

//! Port interfaces for lead intake and the lead pipeline
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for lead operations.

use abacus_domain::constants::{
    SUBMISSION_NO_RESPONSE_MESSAGE, SUBMISSION_TIMEOUT_MESSAGE, SUBMISSION_TRANSPORT_MESSAGE,
};
use abacus_domain::{CreatedLead, LeadPage, LeadQuery, LeadRecord, LeadSubmission, LeadUpdate, Result};
use async_trait::async_trait;
use thiserror::Error;

/// Why a lead submission did not go through.
///
/// `Display` yields the message shown to the person filling in the form.
/// Submission failures never block the wizard; they travel with the results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The API answered successfully but refused the lead.
    #[error("{0}")]
    Rejected(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{}", SUBMISSION_TIMEOUT_MESSAGE)]
    Timeout,

    /// The request went out but nothing came back.
    #[error("{}", SUBMISSION_NO_RESPONSE_MESSAGE)]
    NoResponse,

    /// Anything else; `detail` is for logs only.
    #[error("{}", SUBMISSION_TRANSPORT_MESSAGE)]
    Transport { detail: String },
}

impl SubmissionError {
    /// Stable label suitable for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "rejected",
            Self::Server { .. } => "server",
            Self::Timeout => "timeout",
            Self::NoResponse => "no_response",
            Self::Transport { .. } => "transport",
        }
    }
}

/// Accepts finished lead submissions.
#[async_trait]
pub trait LeadIntake: Send + Sync {
    /// Submit a lead exactly once. Implementations must not retry.
    async fn create_lead(
        &self,
        submission: &LeadSubmission,
    ) -> std::result::Result<CreatedLead, SubmissionError>;
}

/// Back-office access to captured leads.
#[async_trait]
pub trait LeadDirectory: Send + Sync {
    /// Fetch one page of leads matching `query`.
    async fn list_leads(&self, query: &LeadQuery) -> Result<LeadPage>;

    /// Apply a partial update and return the updated lead.
    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> Result<LeadRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_user_facing_message() {
        assert_eq!(SubmissionError::Timeout.to_string(), "Request timeout. Please try again.");
        assert_eq!(
            SubmissionError::Transport { detail: "dns failure".into() }.to_string(),
            "Unable to connect to server. Please try again later."
        );
        assert_eq!(
            SubmissionError::Server { status: 500, message: "Server error: 500".into() }
                .to_string(),
            "Server error: 500"
        );
        assert_eq!(SubmissionError::Rejected("Duplicate lead".into()).to_string(), "Duplicate lead");
    }
}

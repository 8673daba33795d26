//! Property report requests

use std::time::{Duration, Instant};

use abacus_domain::{ContactInfo, CreatedLead, LeadSubmission, Listing};
use serde::{Serialize, Serializer};
use tracing::{info, warn};

use crate::calculator::{validate_contact, ValidationErrors};
use crate::leads::ports::{LeadIntake, SubmissionError};

/// How a property report request went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReportOutcome {
    #[serde(rename_all = "camelCase")]
    Requested { property_code: String, lead: CreatedLead },
    #[serde(rename_all = "camelCase")]
    Failed {
        property_code: String,
        #[serde(serialize_with = "user_message")]
        error: SubmissionError,
    },
    /// Contact details were incomplete; nothing was sent.
    Invalid { errors: ValidationErrors },
}

impl ReportOutcome {
    pub fn is_requested(&self) -> bool {
        matches!(self, Self::Requested { .. })
    }
}

fn user_message<S: Serializer>(err: &SubmissionError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}

/// Ask for a detailed report on `listing`.
///
/// Contact details are checked with the calculator's rules. The request is
/// sent once and abandoned after `timeout`.
pub async fn request_report<I>(
    intake: &I,
    listing: &Listing,
    contact: ContactInfo,
    timeout: Duration,
) -> ReportOutcome
where
    I: LeadIntake + ?Sized,
{
    if let Err(errors) = validate_contact(&contact) {
        return ReportOutcome::Invalid { errors };
    }

    let submission = LeadSubmission::property_report(contact, listing);
    let property_code = listing.property_code.clone();
    let start = Instant::now();
    let result = tokio::time::timeout(timeout, intake.create_lead(&submission))
        .await
        .unwrap_or(Err(SubmissionError::Timeout));
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(lead) => {
            info!(
                lead_id = lead.id.as_deref().unwrap_or("-"),
                property_code = %property_code,
                duration_ms,
                "property report requested"
            );
            ReportOutcome::Requested { property_code, lead }
        }
        Err(error) => {
            warn!(
                error_type = error.label(),
                property_code = %property_code,
                duration_ms,
                "property report request failed"
            );
            ReportOutcome::Failed { property_code, error }
        }
    }
}

//! Results step: per-category breakdown, totals and submission outcome

use abacus_domain::constants::{SUBMISSION_SUCCESS_MESSAGE, SUBMISSION_WARNING_MESSAGE};
use abacus_domain::{Category, ContactInfo, CreatedLead, SpaceEntry, SpaceRequest};
use num_format::{Locale, ToFormattedString};
use serde::Serialize;

use crate::leads::ports::SubmissionError;

/// One row of the space breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub category: Category,
    pub label: &'static str,
    pub details: String,
    pub quantity: u32,
    pub unit_area: u32,
    pub area: u64,
}

impl BreakdownLine {
    fn from_entry(entry: &SpaceEntry) -> Self {
        let details = match *entry {
            SpaceEntry::Workstations { size, persons } => {
                format!("{persons} persons ({})", size.label())
            }
            SpaceEntry::Cabins { count } => format!("{count} cabin(s)"),
            SpaceEntry::Reception { count } => format!("{count} reception(s)"),
            SpaceEntry::Pantry { size, count } => format!("{count} pantry(s) ({})", size.label()),
            SpaceEntry::ConferenceRoom { size, count } => {
                format!("{count} room(s) ({})", size.label())
            }
            SpaceEntry::ServerRoom { count } => format!("{count} room(s)"),
        };

        Self {
            category: entry.category(),
            label: entry.category().label(),
            details,
            quantity: entry.quantity(),
            unit_area: entry.unit_area(),
            area: entry.area(),
        }
    }
}

/// Breakdown rows for every category with a non-zero quantity, in category
/// order.
pub fn breakdown(space: &SpaceRequest) -> Vec<BreakdownLine> {
    space.entries().filter(|e| e.quantity() > 0).map(BreakdownLine::from_entry).collect()
}

/// `1620` → `"1,620 sq.ft"`.
pub fn format_sqft(area: u64) -> String {
    format!("{} sq.ft", area.to_formatted_string(&Locale::en))
}

/// How the lead submission went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "SubmissionView")]
pub enum SubmissionOutcome {
    Submitted(CreatedLead),
    Failed(SubmissionError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    /// Banner shown above the results.
    pub fn banner(&self) -> &'static str {
        match self {
            Self::Submitted(_) => SUBMISSION_SUCCESS_MESSAGE,
            Self::Failed(_) => SUBMISSION_WARNING_MESSAGE,
        }
    }

    /// Failure message from the intake layer, if the submission failed.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Submitted(_) => None,
            Self::Failed(err) => Some(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct SubmissionView {
    success: bool,
    banner: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead: Option<CreatedLead>,
}

impl From<SubmissionOutcome> for SubmissionView {
    fn from(outcome: SubmissionOutcome) -> Self {
        let banner = outcome.banner();
        match outcome {
            SubmissionOutcome::Submitted(lead) => {
                Self { success: true, banner, error: None, lead: Some(lead) }
            }
            SubmissionOutcome::Failed(err) => {
                Self { success: false, banner, error: Some(err.to_string()), lead: None }
            }
        }
    }
}

/// Everything the results step shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationReport {
    pub contact: ContactInfo,
    pub breakdown: Vec<BreakdownLine>,
    pub total_area: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionOutcome>,
}

impl CalculationReport {
    /// Compute a report from the current inputs. Safe to call repeatedly.
    pub fn compute(space: &SpaceRequest, contact: &ContactInfo) -> Self {
        Self {
            contact: contact.clone(),
            breakdown: breakdown(space),
            total_area: space.total_area(),
            submission: None,
        }
    }

    pub fn with_submission(mut self, outcome: SubmissionOutcome) -> Self {
        self.submission = Some(outcome);
        self
    }

    /// Total rounded up to whole thousands of square feet.
    pub fn approx_thousand_sqft(&self) -> u64 {
        self.total_area.div_ceil(1000)
    }
}

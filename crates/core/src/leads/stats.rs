//! Pipeline statistics over a page of leads

use abacus_domain::{LeadRecord, LeadStatus};
use serde::Serialize;

/// Lead counts by headline pipeline stage.
///
/// Only the stages shown on the back-office dashboard get their own counter;
/// `proposal_sent` and `closed_lost` leads count toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub total: usize,
    pub new: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub closed_won: usize,
}

impl PipelineStats {
    pub fn from_leads(leads: &[LeadRecord]) -> Self {
        leads.iter().fold(Self::default(), |mut stats, lead| {
            stats.total += 1;
            match lead.status {
                LeadStatus::New => stats.new += 1,
                LeadStatus::Contacted => stats.contacted += 1,
                LeadStatus::Qualified => stats.qualified += 1,
                LeadStatus::ClosedWon => stats.closed_won += 1,
                LeadStatus::ProposalSent | LeadStatus::ClosedLost => {}
            }
            stats
        })
    }
}

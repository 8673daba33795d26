//! Lead pipeline service - core business logic for back-office lead work

use std::sync::Arc;

use abacus_domain::{AbacusError, LeadPage, LeadQuery, LeadRecord, LeadUpdate, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::ports::LeadDirectory;
use super::stats::PipelineStats;

/// A page of leads with its dashboard counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOverview {
    pub page: LeadPage,
    pub stats: PipelineStats,
}

/// Lead pipeline service
pub struct LeadPipelineService {
    directory: Arc<dyn LeadDirectory>,
}

impl LeadPipelineService {
    /// Create a new pipeline service
    pub fn new(directory: Arc<dyn LeadDirectory>) -> Self {
        Self { directory }
    }

    /// List one page of leads and compute stats over it.
    pub async fn overview(&self, query: &LeadQuery) -> Result<PipelineOverview> {
        if query.limit == 0 {
            return Err(AbacusError::InvalidInput("page size must be at least 1".into()));
        }

        let page = self.directory.list_leads(query).await?;
        let stats = PipelineStats::from_leads(&page.leads);
        debug!(
            page = page.pagination.page,
            pages = page.pagination.pages,
            total = stats.total,
            "lead page loaded"
        );

        Ok(PipelineOverview { page, stats })
    }

    /// Update a lead's status and/or notes.
    pub async fn update(&self, id: &str, update: &LeadUpdate) -> Result<LeadRecord> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AbacusError::InvalidInput("lead id is required".into()));
        }
        if update.is_empty() {
            return Err(AbacusError::InvalidInput("nothing to update".into()));
        }

        let record = self.directory.update_lead(id, update).await?;
        info!(lead_id = %record.id, status = %record.status, "lead updated");
        Ok(record)
    }
}

//! Back-office lead pipeline commands

use std::time::Instant;

use abacus_core::PipelineOverview;
use abacus_domain::{LeadQuery, LeadRecord, LeadUpdate, Result};
use tracing::warn;

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

/// List one page of leads with pipeline counters.
pub async fn list_leads(ctx: &AppContext, query: &LeadQuery) -> Result<PipelineOverview> {
    let command_name = "leads::list_leads";
    let start = Instant::now();

    let result = ctx.pipeline.overview(query).await;

    if let Err(err) = &result {
        warn!(command = command_name, error_type = error_label(err), "lead listing failed");
    }
    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Change a lead's status and/or notes.
pub async fn update_lead(ctx: &AppContext, id: &str, update: &LeadUpdate) -> Result<LeadRecord> {
    let command_name = "leads::update_lead";
    let start = Instant::now();

    let result = ctx.pipeline.update(id, update).await;

    if let Err(err) = &result {
        warn!(command = command_name, error_type = error_label(err), "lead update failed");
    }
    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

//! Listing catalog commands and property report requests

use std::future::Future;
use std::time::Instant;

use abacus_core::{request_report, ListingWrite, ReportOutcome};
use abacus_domain::{
    ContactInfo, Listing, ListingChanges, ListingDeletion, ListingDraft, ListingPage,
    ListingQuery, PropertyCodeStats, Result,
};
use tracing::warn;

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

async fn logged<T>(command_name: &str, action: impl Future<Output = Result<T>>) -> Result<T> {
    let start = Instant::now();

    let result = action.await;

    if let Err(err) = &result {
        warn!(command = command_name, error_type = error_label(err), "listing command failed");
    }
    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

/// Browse one page of listings.
pub async fn list_listings(ctx: &AppContext, query: &ListingQuery) -> Result<ListingPage> {
    logged("listings::list_listings", ctx.catalog.browse(query)).await
}

pub async fn show_listing(ctx: &AppContext, id: &str) -> Result<Listing> {
    logged("listings::show_listing", ctx.catalog.listing(id)).await
}

pub async fn listing_locations(ctx: &AppContext) -> Result<Vec<String>> {
    logged("listings::locations", ctx.catalog.locations()).await
}

pub async fn listing_types(ctx: &AppContext) -> Result<Vec<String>> {
    logged("listings::types", ctx.catalog.kinds()).await
}

/// Validate and publish a new listing.
pub async fn create_listing(ctx: &AppContext, draft: ListingDraft) -> Result<ListingWrite> {
    logged("listings::create_listing", ctx.catalog.create(draft)).await
}

pub async fn update_listing(
    ctx: &AppContext,
    id: &str,
    changes: &ListingChanges,
) -> Result<ListingWrite> {
    logged("listings::update_listing", ctx.catalog.revise(id, changes)).await
}

pub async fn delete_listing(ctx: &AppContext, id: &str) -> Result<ListingDeletion> {
    logged("listings::delete_listing", ctx.catalog.remove(id)).await
}

pub async fn property_codes(ctx: &AppContext) -> Result<PropertyCodeStats> {
    logged("listings::property_codes", ctx.catalog.property_code_stats()).await
}

/// Look up a listing and submit a report request for it as a lead.
///
/// Only the lookup can fail the command; a refused or failed submission is
/// part of the returned outcome.
pub async fn report_listing(
    ctx: &AppContext,
    id: &str,
    contact: ContactInfo,
) -> Result<ReportOutcome> {
    let command_name = "listings::report_listing";
    let start = Instant::now();

    let result = match ctx.catalog.listing(id).await {
        Ok(listing) => {
            Ok(request_report(ctx.intake.as_ref(), &listing, contact, ctx.submit_timeout()).await)
        }
        Err(err) => {
            warn!(command = command_name, error_type = error_label(&err), "listing lookup failed");
            Err(err)
        }
    };

    let success = matches!(&result, Ok(outcome) if outcome.is_requested());
    log_command_execution(command_name, start.elapsed(), success);
    result
}

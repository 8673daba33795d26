//! Listing catalog service - browsing and back-office listing maintenance

use std::sync::Arc;

use abacus_domain::{
    AbacusError, Listing, ListingChanges, ListingDeletion, ListingDraft, ListingPage,
    ListingQuery, PropertyCodeStats, Result,
};
use serde::Serialize;
use tracing::{debug, info};

use super::ports::ListingDirectory;
use super::validation::{validate_listing, FieldIssue};

/// Result of creating or editing a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ListingWrite {
    Saved { listing: Listing },
    /// The draft was refused locally and never sent.
    Invalid { errors: Vec<FieldIssue> },
}

impl ListingWrite {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Listing catalog service
pub struct ListingCatalogService {
    directory: Arc<dyn ListingDirectory>,
}

impl ListingCatalogService {
    pub fn new(directory: Arc<dyn ListingDirectory>) -> Self {
        Self { directory }
    }

    /// One page of listings.
    pub async fn browse(&self, query: &ListingQuery) -> Result<ListingPage> {
        if query.limit == 0 {
            return Err(AbacusError::InvalidInput("page size must be at least 1".into()));
        }

        let page = self.directory.list_listings(query).await?;
        debug!(
            page = page.pagination.page,
            pages = page.pagination.pages,
            count = page.listings.len(),
            "listing page loaded"
        );
        Ok(page)
    }

    pub async fn locations(&self) -> Result<Vec<String>> {
        self.directory.locations().await
    }

    pub async fn kinds(&self) -> Result<Vec<String>> {
        self.directory.kinds().await
    }

    pub async fn listing(&self, id: &str) -> Result<Listing> {
        self.directory.get_listing(required_id(id)?).await
    }

    /// Validate and publish a new listing.
    pub async fn create(&self, draft: ListingDraft) -> Result<ListingWrite> {
        let draft = draft.normalized();
        if let Err(err) = validate_listing(&draft) {
            debug!(issues = err.error_count(), "listing draft refused");
            return Ok(ListingWrite::Invalid { errors: FieldIssue::from_validation(err) });
        }

        let listing = self.directory.create_listing(&draft).await?;
        info!(listing_id = %listing.id, property_code = %listing.property_code, "listing created");
        Ok(ListingWrite::Saved { listing })
    }

    /// Apply `changes` to the current listing and replace it.
    ///
    /// The merged listing must still pass the same checks as a new one.
    pub async fn revise(&self, id: &str, changes: &ListingChanges) -> Result<ListingWrite> {
        let id = required_id(id)?;
        if changes.is_empty() {
            return Err(AbacusError::InvalidInput("nothing to update".into()));
        }

        let current = self.directory.get_listing(id).await?;
        let draft = ListingDraft::from(&current).apply(changes).normalized();
        if let Err(err) = validate_listing(&draft) {
            debug!(listing_id = id, issues = err.error_count(), "listing edit refused");
            return Ok(ListingWrite::Invalid { errors: FieldIssue::from_validation(err) });
        }

        let listing = self.directory.update_listing(id, &draft).await?;
        info!(listing_id = %listing.id, "listing updated");
        Ok(ListingWrite::Saved { listing })
    }

    pub async fn remove(&self, id: &str) -> Result<ListingDeletion> {
        let id = required_id(id)?;
        let deletion = self.directory.delete_listing(id).await?;
        info!(
            listing_id = id,
            images_cleaned = deletion.cleanup.map_or(0, |c| c.cleaned_images),
            "listing deleted"
        );
        Ok(deletion)
    }

    pub async fn property_code_stats(&self) -> Result<PropertyCodeStats> {
        self.directory.property_code_stats().await
    }
}

fn required_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AbacusError::InvalidInput("listing id is required".into()));
    }
    Ok(id)
}

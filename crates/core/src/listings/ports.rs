//! Port interface for the listings catalog

use abacus_domain::{
    Listing, ListingDeletion, ListingDraft, ListingPage, ListingQuery, PropertyCodeStats, Result,
};
use async_trait::async_trait;

/// Read and write access to published listings.
#[async_trait]
pub trait ListingDirectory: Send + Sync {
    /// Fetch one page of listings matching `query`.
    async fn list_listings(&self, query: &ListingQuery) -> Result<ListingPage>;

    /// Locations that currently have listings.
    async fn locations(&self) -> Result<Vec<String>>;

    /// Listing types that currently have listings.
    async fn kinds(&self) -> Result<Vec<String>>;

    async fn get_listing(&self, id: &str) -> Result<Listing>;

    /// Publish a new listing. The property code is assigned remotely.
    async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing>;

    /// Replace every editable field of a listing.
    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> Result<Listing>;

    async fn delete_listing(&self, id: &str) -> Result<ListingDeletion>;

    async fn property_code_stats(&self) -> Result<PropertyCodeStats>;
}

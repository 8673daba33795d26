//! Listings API client
//!
//! Public browsing (`GET {base}/listings`, `/listings/locations`,
//! `/listings/types`, `/listings/{id}`) and back-office maintenance
//! (`POST`, `PUT` and `DELETE` on `/listings`, plus
//! `GET /listings/stats/property-codes`).

use std::time::Duration;

use abacus_core::ListingDirectory;
use abacus_domain::constants::LISTINGS_PATH;
use abacus_domain::{
    AbacusError, ApiConfig, Listing, ListingDeletion, ListingDraft, ListingPage, ListingQuery,
    Pagination, PropertyCodeStats, Result,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::envelope::read_envelope;
use super::errors::ApiError;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Client for the listings REST API.
#[derive(Clone)]
pub struct ListingsApiClient {
    http: HttpClient,
    listings_url: Url,
}

impl ListingsApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns `AbacusError::Config` if the base URL does not parse.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let listings_url = Url::parse(&format!("{base}{LISTINGS_PATH}"))
            .map_err(|err| AbacusError::from(InfraError::from(err)))?;
        Ok(Self { http, listings_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Self::new(builder.build()?, &config.base_url)
    }

    pub fn listings_url(&self) -> &Url {
        &self.listings_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.listings_url.clone();
        url.path_segments_mut()
            .map_err(|()| AbacusError::Config("API base URL can not hold a path".into()))?
            .extend(segments);
        Ok(url)
    }

    /// Read request; retried by the HTTP client.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<(Option<T>, Option<Pagination>)> {
        let response = self.http.send(request).await?;
        let envelope = read_envelope::<T>(response).await?;
        Ok((envelope.data, envelope.pagination))
    }

    /// Write request; sent exactly once.
    async fn write<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let response = self
            .http
            .send_once(request)
            .await
            .map_err(|err| AbacusError::from(ApiError::from_reqwest(&err)))?;
        Ok(read_envelope::<T>(response).await?.data)
    }

    async fn names(&self, segment: &str) -> Result<Vec<String>> {
        let request = self.http.request(Method::GET, self.url(&[segment])?);
        let (names, _) = self.fetch::<Vec<String>>(request).await?;
        Ok(names.unwrap_or_default())
    }
}

fn missing(what: &str) -> AbacusError {
    AbacusError::Remote(format!("response did not include the {what}"))
}

#[async_trait]
impl ListingDirectory for ListingsApiClient {
    #[instrument(skip_all, fields(page = query.page, limit = query.limit))]
    async fn list_listings(&self, query: &ListingQuery) -> Result<ListingPage> {
        let request = self
            .http
            .request(Method::GET, self.listings_url.clone())
            .query(&query.to_query_pairs());

        let (listings, pagination) = self.fetch::<Vec<Listing>>(request).await?;
        let listings = listings.unwrap_or_default();
        let pagination = pagination.unwrap_or(Pagination {
            page: query.page.max(1),
            pages: 1,
            total: Some(listings.len() as u64),
        });
        debug!(count = listings.len(), pages = pagination.pages, "listings fetched");

        Ok(ListingPage { listings, pagination })
    }

    async fn locations(&self) -> Result<Vec<String>> {
        self.names("locations").await
    }

    async fn kinds(&self) -> Result<Vec<String>> {
        self.names("types").await
    }

    #[instrument(skip_all, fields(listing_id = %id))]
    async fn get_listing(&self, id: &str) -> Result<Listing> {
        let request = self.http.request(Method::GET, self.url(&[id])?);
        let (listing, _) = self.fetch::<Listing>(request).await?;
        listing.ok_or_else(|| AbacusError::NotFound(format!("listing {id}")))
    }

    #[instrument(skip_all, fields(location = %draft.location, kind = %draft.kind))]
    async fn create_listing(&self, draft: &ListingDraft) -> Result<Listing> {
        let request = self.http.request(Method::POST, self.listings_url.clone()).json(draft);
        let listing = self.write::<Listing>(request).await?.ok_or_else(|| missing("listing"))?;
        debug!(property_code = %listing.property_code, "listing created");
        Ok(listing)
    }

    #[instrument(skip_all, fields(listing_id = %id))]
    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> Result<Listing> {
        let request = self.http.request(Method::PUT, self.url(&[id])?).json(draft);
        self.write::<Listing>(request).await?.ok_or_else(|| missing("listing"))
    }

    #[instrument(skip_all, fields(listing_id = %id))]
    async fn delete_listing(&self, id: &str) -> Result<ListingDeletion> {
        let request = self.http.request(Method::DELETE, self.url(&[id])?);
        Ok(self.write::<ListingDeletion>(request).await?.unwrap_or_default())
    }

    async fn property_code_stats(&self) -> Result<PropertyCodeStats> {
        let request = self.http.request(Method::GET, self.url(&["stats", "property-codes"])?);
        let (stats, _) = self.fetch::<PropertyCodeStats>(request).await?;
        stats.ok_or_else(|| missing("property code statistics"))
    }
}

//! In-memory implementations of the lead and listing ports

use std::sync::{Arc, Mutex};
use std::time::Duration;

use abacus_core::{LeadDirectory, LeadIntake, ListingDirectory, SubmissionError};
use abacus_domain::{
    AbacusError, CreatedLead, ImageCleanup, LeadPage, LeadQuery, LeadRecord, LeadSubmission,
    LeadUpdate, Listing, ListingDeletion, ListingDraft, ListingPage, ListingQuery, Pagination,
    PropertyCodeCounter, PropertyCodeStats, Result as DomainResult,
};
use async_trait::async_trait;

/// Records every submission and answers with a fixed result.
#[derive(Clone)]
pub struct RecordingIntake {
    result: Result<CreatedLead, SubmissionError>,
    delay: Option<Duration>,
    submissions: Arc<Mutex<Vec<LeadSubmission>>>,
}

impl RecordingIntake {
    pub fn accepting(id: &str) -> Self {
        Self::with_result(Ok(CreatedLead { id: Some(id.to_string()), ..CreatedLead::default() }))
    }

    pub fn failing(err: SubmissionError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(result: Result<CreatedLead, SubmissionError>) -> Self {
        Self { result, delay: None, submissions: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Sleep before answering, to exercise the wizard's submit timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn submissions(&self) -> Vec<LeadSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadIntake for RecordingIntake {
    async fn create_lead(
        &self,
        submission: &LeadSubmission,
    ) -> Result<CreatedLead, SubmissionError> {
        self.submissions.lock().unwrap().push(submission.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

/// Serves a fixed set of leads and applies updates in memory.
#[derive(Default, Clone)]
pub struct InMemoryDirectory {
    leads: Arc<Mutex<Vec<LeadRecord>>>,
    queries: Arc<Mutex<Vec<LeadQuery>>>,
}

impl InMemoryDirectory {
    pub fn new(leads: Vec<LeadRecord>) -> Self {
        Self { leads: Arc::new(Mutex::new(leads)), queries: Arc::default() }
    }

    pub fn queries(&self) -> Vec<LeadQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadDirectory for InMemoryDirectory {
    async fn list_leads(&self, query: &LeadQuery) -> DomainResult<LeadPage> {
        self.queries.lock().unwrap().push(query.clone());
        let leads = self.leads.lock().unwrap();
        let matching: Vec<_> = leads
            .iter()
            .filter(|l| query.status.map_or(true, |s| l.status == s))
            .filter(|l| query.source.map_or(true, |s| l.source == s))
            .cloned()
            .collect();

        let limit = query.limit.max(1) as usize;
        let total = matching.len();
        let pages = total.div_ceil(limit).max(1) as u32;
        let skip = (query.page.max(1) as usize - 1) * limit;

        Ok(LeadPage {
            leads: matching.into_iter().skip(skip).take(limit).collect(),
            pagination: Pagination { page: query.page.max(1), pages, total: Some(total as u64) },
        })
    }

    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> DomainResult<LeadRecord> {
        let mut leads = self.leads.lock().unwrap();
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AbacusError::NotFound(format!("lead {id}")))?;

        if let Some(status) = update.status {
            lead.status = status;
        }
        if let Some(notes) = &update.notes {
            lead.notes = Some(notes.clone());
        }
        Ok(lead.clone())
    }
}

/// Listing catalog kept in memory. New listings get `<LOC>-<T>-<NNN>` codes.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    listings: Arc<Mutex<Vec<Listing>>>,
    writes: Arc<Mutex<Vec<ListingDraft>>>,
}

impl InMemoryCatalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings: Arc::new(Mutex::new(listings)), writes: Arc::default() }
    }

    /// Every draft sent through create or update.
    pub fn writes(&self) -> Vec<ListingDraft> {
        self.writes.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.listings.lock().unwrap().len()
    }

    fn prefix(draft: &ListingDraft) -> String {
        let location: String = draft.location.chars().take(3).collect();
        let kind = draft.kind.chars().next().unwrap_or('C');
        format!("{}-{}", location.to_uppercase(), kind.to_ascii_uppercase())
    }
}

fn contains(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl ListingDirectory for InMemoryCatalog {
    async fn list_listings(&self, query: &ListingQuery) -> DomainResult<ListingPage> {
        let pairs = query.to_query_pairs();
        let filter = |key: &str| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone());
        let (search, kind, location) = (filter("search"), filter("type"), filter("location"));

        let listings = self.listings.lock().unwrap();
        let matching: Vec<_> = listings
            .iter()
            .filter(|l| kind.as_ref().map_or(true, |k| &l.kind == k))
            .filter(|l| location.as_ref().map_or(true, |loc| &l.location == loc))
            .filter(|l| {
                search
                    .as_ref()
                    .map_or(true, |s| contains(&l.title, s) || contains(&l.property_code, s))
            })
            .cloned()
            .collect();

        let limit = query.limit.max(1) as usize;
        let total = matching.len();
        let pages = total.div_ceil(limit).max(1) as u32;
        let skip = (query.page.max(1) as usize - 1) * limit;

        Ok(ListingPage {
            listings: matching.into_iter().skip(skip).take(limit).collect(),
            pagination: Pagination { page: query.page.max(1), pages, total: Some(total as u64) },
        })
    }

    async fn locations(&self) -> DomainResult<Vec<String>> {
        let mut locations: Vec<_> =
            self.listings.lock().unwrap().iter().map(|l| l.location.clone()).collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }

    async fn kinds(&self) -> DomainResult<Vec<String>> {
        let mut kinds: Vec<_> =
            self.listings.lock().unwrap().iter().map(|l| l.kind.clone()).collect();
        kinds.sort();
        kinds.dedup();
        Ok(kinds)
    }

    async fn get_listing(&self, id: &str) -> DomainResult<Listing> {
        self.listings
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| AbacusError::NotFound(format!("listing {id}")))
    }

    async fn create_listing(&self, draft: &ListingDraft) -> DomainResult<Listing> {
        self.writes.lock().unwrap().push(draft.clone());
        let mut listings = self.listings.lock().unwrap();
        let prefix = Self::prefix(draft);
        let issued = listings.iter().filter(|l| l.property_code.starts_with(&prefix)).count();

        let listing = Listing {
            id: format!("new-{}", listings.len() + 1),
            property_code: format!("{prefix}-{:03}", issued + 1),
            title: draft.title.clone(),
            kind: draft.kind.clone(),
            location: draft.location.clone(),
            area: draft.area.clone(),
            price: draft.price.clone(),
            features: draft.features.clone(),
            images: draft.images.clone(),
            views_range: Some(draft.views_range),
            created_at: None,
        };
        listings.push(listing.clone());
        Ok(listing)
    }

    async fn update_listing(&self, id: &str, draft: &ListingDraft) -> DomainResult<Listing> {
        self.writes.lock().unwrap().push(draft.clone());
        let mut listings = self.listings.lock().unwrap();
        let listing = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AbacusError::NotFound(format!("listing {id}")))?;

        listing.title.clone_from(&draft.title);
        listing.kind.clone_from(&draft.kind);
        listing.location.clone_from(&draft.location);
        listing.area.clone_from(&draft.area);
        listing.price.clone_from(&draft.price);
        listing.features.clone_from(&draft.features);
        listing.images.clone_from(&draft.images);
        listing.views_range = Some(draft.views_range);
        Ok(listing.clone())
    }

    async fn delete_listing(&self, id: &str) -> DomainResult<ListingDeletion> {
        let mut listings = self.listings.lock().unwrap();
        let index = listings
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| AbacusError::NotFound(format!("listing {id}")))?;
        let removed = listings.remove(index);
        let images = removed.images.len() as u32;

        Ok(ListingDeletion {
            cleanup: Some(ImageCleanup {
                cleaned_images: images,
                total_images: images,
                failed_cleanup: 0,
            }),
        })
    }

    async fn property_code_stats(&self) -> DomainResult<PropertyCodeStats> {
        let listings = self.listings.lock().unwrap();
        let mut counters: Vec<PropertyCodeCounter> = Vec::new();
        for listing in listings.iter() {
            let prefix = listing.property_code.rsplitn(2, '-').nth(1).unwrap_or_default();
            match counters.iter_mut().find(|c| c.prefix == prefix) {
                Some(counter) => counter.count += 1,
                None => counters.push(PropertyCodeCounter {
                    prefix: prefix.to_string(),
                    count: 1,
                    last_updated: None,
                }),
            }
        }

        Ok(PropertyCodeStats {
            total_counters: counters.len() as u32,
            total_listings: listings.len() as u32,
            counters,
        })
    }
}

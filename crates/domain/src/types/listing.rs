//! Property listing types
//!
//! Listings are the brokerage's published office, retail and co-working
//! spaces. Field names follow the listings API (`_id`, `propertyCode`,
//! `type`, `viewsRange`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lead::Pagination;
use crate::constants::{DEFAULT_LISTINGS_PAGE_SIZE, DEFAULT_VIEWS_RANGE};

/// A published property.
///
/// `area` and `price` are display strings ("4,500 sq.ft", "₹85/sq.ft") and
/// are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Assigned by the API on creation (`BLR-O-007`); immutable afterwards.
    #[serde(default)]
    pub property_code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_range: Option<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub pagination: Pagination,
}

/// Browse filters. Blank values and the catch-all `"all"` are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub location: Option<String>,
    pub kind: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LISTINGS_PAGE_SIZE,
            search: None,
            location: None,
            kind: None,
        }
    }
}

impl ListingQuery {
    /// Query string pairs in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs =
            vec![("page", self.page.max(1).to_string()), ("limit", self.limit.to_string())];

        let filters =
            [("search", &self.search), ("type", &self.kind), ("location", &self.location)];
        for (key, value) in filters {
            if let Some(value) = active_filter(value.as_deref()) {
                pairs.push((key, value.to_string()));
            }
        }

        pairs
    }
}

fn active_filter(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Body sent to create or replace a listing.
///
/// The property code is never part of it; the API derives it from the
/// location and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub views_range: [u32; 2],
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            kind: "Office".to_string(),
            location: String::new(),
            area: String::new(),
            price: String::new(),
            features: Vec::new(),
            images: Vec::new(),
            views_range: DEFAULT_VIEWS_RANGE,
        }
    }
}

impl ListingDraft {
    /// Trim text fields and drop blank features and images.
    pub fn normalized(mut self) -> Self {
        for field in [&mut self.title, &mut self.area, &mut self.price, &mut self.location] {
            *field = field.trim().to_string();
        }
        self.kind = self.kind.trim().to_string();
        self.features = non_blank(self.features);
        self.images = non_blank(self.images);
        if self.views_range[0] > self.views_range[1] {
            self.views_range.swap(0, 1);
        }
        self
    }

    /// Apply the set fields of `changes` on top of this draft.
    pub fn apply(mut self, changes: &ListingChanges) -> Self {
        let text_changes = [
            (&mut self.title, &changes.title),
            (&mut self.kind, &changes.kind),
            (&mut self.location, &changes.location),
            (&mut self.area, &changes.area),
            (&mut self.price, &changes.price),
        ];
        for (field, change) in text_changes {
            if let Some(value) = change {
                field.clone_from(value);
            }
        }
        if let Some(features) = &changes.features {
            self.features.clone_from(features);
        }
        if !changes.add_images.is_empty() {
            self.images.extend(changes.add_images.iter().cloned());
        }
        if let Some(range) = changes.views_range {
            self.views_range = range;
        }
        self
    }
}

impl From<&Listing> for ListingDraft {
    fn from(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            kind: listing.kind.clone(),
            location: listing.location.clone(),
            area: listing.area.clone(),
            price: listing.price.clone(),
            features: listing.features.clone(),
            images: listing.images.clone(),
            views_range: listing.views_range.unwrap_or(DEFAULT_VIEWS_RANGE),
        }
    }
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Edits requested for an existing listing. Images are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingChanges {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub area: Option<String>,
    pub price: Option<String>,
    /// Replaces the feature list when set.
    pub features: Option<Vec<String>>,
    pub add_images: Vec<String>,
    pub views_range: Option<[u32; 2]>,
}

impl ListingChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Image cleanup summary returned when a listing is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCleanup {
    #[serde(default)]
    pub cleaned_images: u32,
    #[serde(default)]
    pub total_images: u32,
    #[serde(default)]
    pub failed_cleanup: u32,
}

/// What the API reports after deleting a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDeletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<ImageCleanup>,
}

/// Per-prefix property code counter (`BLR-O` has issued 7 codes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCodeCounter {
    pub prefix: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl PropertyCodeCounter {
    /// Code the next listing under this prefix will receive.
    pub fn next_code(&self) -> String {
        format!("{}-{:03}", self.prefix, self.count.saturating_add(1))
    }

    /// Three-letter city code half of the prefix.
    pub fn location_code(&self) -> &str {
        self.prefix.split('-').next().unwrap_or_default()
    }

    /// Listing type spelled out from the one-letter type code.
    pub fn kind_label(&self) -> &'static str {
        match self.prefix.split('-').nth(1) {
            Some("O") => "Office",
            Some("R") => "Retail",
            _ => "Co-Working",
        }
    }
}

/// Property code issuance statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCodeStats {
    #[serde(default)]
    pub total_counters: u32,
    #[serde(default)]
    pub total_listings: u32,
    #[serde(default)]
    pub counters: Vec<PropertyCodeCounter>,
}

/// Snapshot of a listing attached to a property report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub property_id: String,
    pub property_code: String,
    pub title: String,
    pub location: String,
    pub area: String,
    pub price: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<String>,
}

impl From<&Listing> for PropertyDetails {
    fn from(listing: &Listing) -> Self {
        Self {
            property_id: listing.id.clone(),
            property_code: listing.property_code.clone(),
            title: listing.title.clone(),
            location: listing.location.clone(),
            area: listing.area.clone(),
            price: listing.price.clone(),
            kind: listing.kind.clone(),
            features: listing.features.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn listing() -> Listing {
        serde_json::from_value(json!({
            "_id": "64f1",
            "propertyCode": "BLR-O-007",
            "title": "Prestige Tech Park, Tower B",
            "type": "Office",
            "location": "Bangalore",
            "area": "12,000 sq.ft",
            "price": "₹95/sq.ft",
            "features": ["Metro access", "Power backup"],
            "images": ["https://cdn.example/1.jpg"],
            "viewsRange": [120, 340]
        }))
        .unwrap()
    }

    #[test]
    fn listing_reads_api_document() {
        let listing = listing();
        assert_eq!(listing.id, "64f1");
        assert_eq!(listing.kind, "Office");
        assert_eq!(listing.views_range, Some([120, 340]));
        assert_eq!(listing.features.len(), 2);
    }

    #[test]
    fn query_drops_blank_and_catch_all_filters() {
        let query = ListingQuery {
            page: 2,
            search: Some("  ".into()),
            location: Some("All".into()),
            kind: Some(" Retail ".into()),
            ..ListingQuery::default()
        };

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "50".to_string()),
                ("type", "Retail".to_string()),
            ]
        );
    }

    #[test]
    fn draft_serializes_without_property_code() {
        let draft = ListingDraft::from(&listing());
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["type"], "Office");
        assert_eq!(value["viewsRange"], json!([120, 340]));
        assert!(value.get("propertyCode").is_none());
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn normalized_draft_trims_and_drops_blank_features() {
        let draft = ListingDraft {
            title: "  Skyline  ".into(),
            features: vec!["Parking".into(), "   ".into(), " Cafeteria ".into()],
            views_range: [300, 100],
            ..ListingDraft::default()
        }
        .normalized();

        assert_eq!(draft.title, "Skyline");
        assert_eq!(draft.features, ["Parking", "Cafeteria"]);
        assert_eq!(draft.views_range, [100, 300]);
    }

    #[test]
    fn changes_override_only_set_fields_and_append_images() {
        let changes = ListingChanges {
            price: Some("₹110/sq.ft".into()),
            add_images: vec!["https://cdn.example/2.jpg".into()],
            ..ListingChanges::default()
        };

        let draft = ListingDraft::from(&listing()).apply(&changes);

        assert_eq!(draft.price, "₹110/sq.ft");
        assert_eq!(draft.title, "Prestige Tech Park, Tower B");
        assert_eq!(draft.images.len(), 2);
        assert!(ListingChanges::default().is_empty());
    }

    #[test]
    fn counter_derives_next_code_and_labels() {
        let counter = PropertyCodeCounter { prefix: "MUM-R".into(), count: 9, last_updated: None };
        assert_eq!(counter.next_code(), "MUM-R-010");
        assert_eq!(counter.location_code(), "MUM");
        assert_eq!(counter.kind_label(), "Retail");

        let coworking =
            PropertyCodeCounter { prefix: "DEL-C".into(), count: 0, last_updated: None };
        assert_eq!(coworking.next_code(), "DEL-C-001");
        assert_eq!(coworking.kind_label(), "Co-Working");
    }

    #[test]
    fn deletion_tolerates_missing_cleanup() {
        let deletion: ListingDeletion = serde_json::from_value(json!({})).unwrap();
        assert!(deletion.cleanup.is_none());

        let deletion: ListingDeletion = serde_json::from_value(json!({
            "cleanup": {"cleanedImages": 2, "totalImages": 3, "failedCleanup": 1}
        }))
        .unwrap();
        assert_eq!(deletion.cleanup.map(|c| c.failed_cleanup), Some(1));
    }
}

//! Lead submission and lead pipeline types
//!
//! Field names follow the lead API's JSON contract (`userInfo`, `spaceData`,
//! `totalArea`, `_id`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contact::ContactInfo;
use super::listing::{Listing, PropertyDetails};
use super::space::SpaceRequest;
use crate::constants::{DEFAULT_LEADS_PAGE_SIZE, PROPERTY_REPORT_REQUEST_TYPE};
use crate::errors::AbacusError;

/// Payload sent to the lead API.
///
/// Built once from the contact details plus either the calculator's space
/// request or the listing a property report is requested for. The value is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    #[serde(rename = "userInfo")]
    contact: ContactInfo,
    #[serde(flatten)]
    details: LeadDetails,
}

/// What the lead is about. Serialized inline next to `userInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LeadDetails {
    /// Calculator lead; the total is fixed at construction.
    #[serde(rename_all = "camelCase")]
    Space {
        #[serde(rename = "spaceData")]
        space: SpaceRequest,
        total_area: u64,
    },
    /// Request for a detailed report on one listing.
    #[serde(rename_all = "camelCase")]
    PropertyReport {
        property_details: PropertyDetails,
        source: LeadSource,
        request_type: &'static str,
    },
}

impl LeadSubmission {
    /// Calculator lead for `space`.
    pub fn new(contact: ContactInfo, space: SpaceRequest) -> Self {
        let total_area = space.total_area();
        Self { contact, details: LeadDetails::Space { space, total_area } }
    }

    /// Property report request for `listing`.
    pub fn property_report(contact: ContactInfo, listing: &Listing) -> Self {
        Self {
            contact,
            details: LeadDetails::PropertyReport {
                property_details: PropertyDetails::from(listing),
                source: LeadSource::PropertyReport,
                request_type: PROPERTY_REPORT_REQUEST_TYPE,
            },
        }
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn details(&self) -> &LeadDetails {
        &self.details
    }

    /// The calculator's space request; `None` for property reports.
    pub fn space(&self) -> Option<&SpaceRequest> {
        match &self.details {
            LeadDetails::Space { space, .. } => Some(space),
            LeadDetails::PropertyReport { .. } => None,
        }
    }

    /// Total calculated area; zero for property reports.
    pub fn total_area(&self) -> u64 {
        match &self.details {
            LeadDetails::Space { total_area, .. } => *total_area,
            LeadDetails::PropertyReport { .. } => 0,
        }
    }

    /// Where the lead was captured.
    pub fn source(&self) -> LeadSource {
        match &self.details {
            LeadDetails::Space { .. } => LeadSource::SpaceCalculator,
            LeadDetails::PropertyReport { source, .. } => *source,
        }
    }
}

/// Standard response envelope returned by the lead API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// What the API echoes back after accepting a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLead {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Sales pipeline stage of a lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    ProposalSent,
    ClosedWon,
    ClosedLost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::ProposalSent,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::ProposalSent => "proposal_sent",
            Self::ClosedWon => "closed_won",
            Self::ClosedLost => "closed_lost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::ProposalSent => "Proposal Sent",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }
}

/// Where a lead was captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LeadSource {
    SpaceCalculator,
    PropertyReport,
    ContactForm,
    #[default]
    Inquiry,
    Direct,
}

impl LeadSource {
    pub const ALL: [LeadSource; 5] = [
        Self::SpaceCalculator,
        Self::PropertyReport,
        Self::ContactForm,
        Self::Inquiry,
        Self::Direct,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::SpaceCalculator => "spacecalculator",
            Self::PropertyReport => "propertyreport",
            Self::ContactForm => "contactform",
            Self::Inquiry => "inquiry",
            Self::Direct => "direct",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SpaceCalculator => "Space Calculator",
            Self::PropertyReport => "Property Report",
            Self::ContactForm => "Contact Form",
            Self::Inquiry => "Inquiry",
            Self::Direct => "Direct",
        }
    }
}

macro_rules! impl_lenient_key_enum {
    ($ty:ty, $what:literal) => {
        impl FromStr for $ty {
            type Err = AbacusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.key().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| AbacusError::InvalidInput(format!("unknown {} `{s}`", $what)))
            }
        }

        // Unknown values coming back from the API fall back to the default.
        impl From<String> for $ty {
            fn from(value: String) -> Self {
                value.parse().unwrap_or_default()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

impl_lenient_key_enum!(LeadStatus, "lead status");
impl_lenient_key_enum!(LeadSource, "lead source");

/// A lead as listed by the back-office API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub status: LeadStatus,
    /// Absent for leads that did not come from the calculator.
    #[serde(default)]
    pub total_area: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Page position reported alongside list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// One page of leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadPage {
    pub leads: Vec<LeadRecord>,
    pub pagination: Pagination,
}

/// Filters for listing leads. Unset filters are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
}

impl Default for LeadQuery {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_LEADS_PAGE_SIZE, search: None, source: None, status: None }
    }
}

impl LeadQuery {
    /// Query string pairs in a stable order. Blank searches are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.max(1).to_string()), ("limit", self.limit.to_string())];

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(source) = self.source {
            pairs.push(("source", source.key().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.key().to_string()));
        }

        pairs
    }
}

/// Partial update applied to a lead by back-office staff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LeadUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none()
    }
}

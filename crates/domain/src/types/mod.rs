//! Domain types and models

pub mod contact;
pub mod lead;
pub mod listing;
pub mod space;

pub use contact::{ContactField, ContactInfo};
pub use lead::{
    ApiResponse, CreatedLead, LeadDetails, LeadPage, LeadQuery, LeadRecord, LeadSource,
    LeadStatus, LeadSubmission, LeadUpdate, Pagination,
};
pub use listing::{
    ImageCleanup, Listing, ListingChanges, ListingDeletion, ListingDraft, ListingPage,
    ListingQuery, PropertyCodeCounter, PropertyCodeStats, PropertyDetails,
};
pub use space::{
    area, unit_area, Category, ConferenceSize, PantrySize, SpaceEntry, SpaceRequest, Variant,
    WorkstationSize,
};

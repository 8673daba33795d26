//! Lead and listings API clients
//!
//! HTTP clients for the brokerage's REST API. [`LeadsApiClient`] implements
//! both lead ports: [`LeadIntake`] for single-shot submissions from the
//! calculator and property report requests, and [`LeadDirectory`] for
//! back-office listing and updates. [`ListingsApiClient`] implements
//! [`ListingDirectory`].
//!
//! # Architecture
//!
//! - Uses the shared [`HttpClient`](crate::http::HttpClient) (no direct reqwest client)
//! - Creates, updates and deletes are sent exactly once; reads may retry
//! - Every HTTP outcome is classified through [`ApiError`]
//! - Blank server messages are treated as absent
//! - Contact details are never logged
//!
//! [`LeadIntake`]: abacus_core::LeadIntake
//! [`LeadDirectory`]: abacus_core::LeadDirectory
//! [`ListingDirectory`]: abacus_core::ListingDirectory

pub mod client;
mod envelope;
pub mod errors;
pub mod listings;

pub use client::LeadsApiClient;
pub use errors::{ApiError, ApiErrorCategory};
pub use listings::ListingsApiClient;

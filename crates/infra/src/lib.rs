//! # Abacus Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with a retry policy for idempotent requests
//! - The lead API client implementing `LeadIntake` and `LeadDirectory`
//! - The listings API client implementing `ListingDirectory`
//! - Configuration loading from environment variables and files
//! - Conversions from external errors into `AbacusError`
//!
//! ## Architecture
//! - Implements traits defined in `abacus-core`
//! - Depends on `abacus-domain` and `abacus-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiError, ApiErrorCategory, LeadsApiClient, ListingsApiClient};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RetryPolicy};

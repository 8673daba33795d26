//! # Abacus Domain
//!
//! Business domain types for the Abacus office space calculator.
//!
//! This crate contains:
//! - Space categories, variants and the compiled-in unit-area table
//! - Contact details, lead submissions and lead pipeline records
//! - Property listings, property code statistics and report requests
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Abacus crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

//! Application constants
//!
//! Centralized location for domain-level constants: the unit-area table,
//! API defaults and user-facing messages.

// Unit areas (sq ft per unit)
pub const WORKSTATION_COMPACT_SQFT: u32 = 25;
pub const WORKSTATION_STANDARD_SQFT: u32 = 30;
pub const WORKSTATION_SPACIOUS_SQFT: u32 = 40;
pub const CABIN_SQFT: u32 = 160;
pub const RECEPTION_SQFT: u32 = 200;
pub const PANTRY_10PAX_SQFT: u32 = 200;
pub const PANTRY_30PAX_SQFT: u32 = 500;
pub const CONFERENCE_7PAX_SQFT: u32 = 150;
pub const CONFERENCE_12PAX_SQFT: u32 = 250;
pub const SERVER_ROOM_SQFT: u32 = 100;

// Lead API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 10;
pub const LEADS_PATH: &str = "/leads";
pub const DEFAULT_LEADS_PAGE_SIZE: u32 = 20;
pub const LISTINGS_PATH: &str = "/listings";
pub const DEFAULT_LISTINGS_PAGE_SIZE: u32 = 50;
pub const DEFAULT_VIEWS_RANGE: [u32; 2] = [100, 300];
pub const PROPERTY_REPORT_REQUEST_TYPE: &str = "property_report";

// HTTP retry policy
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;
/// Longest `Retry-After` the client is willing to honour.
pub const MAX_RETRY_AFTER_SECS: u64 = 30;

// Submission messages
pub const SUBMISSION_SUCCESS_MESSAGE: &str =
    "Your inquiry has been submitted successfully! Our team will contact you within 24 hours.";
pub const SUBMISSION_WARNING_MESSAGE: &str =
    "Your calculation is ready, but we couldn't save your inquiry. Please contact us directly.";
pub const SUBMISSION_REJECTED_FALLBACK: &str = "Failed to submit inquiry";
pub const SUBMISSION_TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";
pub const SUBMISSION_NO_RESPONSE_MESSAGE: &str =
    "No response from server. Please check your internet connection.";
pub const SUBMISSION_TRANSPORT_MESSAGE: &str =
    "Unable to connect to server. Please try again later.";

// Property report messages
pub const REPORT_SUCCESS_MESSAGE: &str = "Request Submitted Successfully! Our team will connect with you soon with a detailed property report.";
pub const REPORT_REJECTED_FALLBACK: &str = "Failed to submit request";

//! API-specific error types
//!
//! Classifies API outcomes and maps them onto the submission error shown
//! to the calculator user and onto the domain error used everywhere else.

use abacus_core::SubmissionError;
use abacus_domain::constants::SUBMISSION_REJECTED_FALLBACK;
use abacus_domain::AbacusError;
use thiserror::Error;

use super::envelope::non_blank;
use crate::errors::status_to_error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 2xx response whose envelope reported `success: false`
    Rejected,
    /// Non-2xx response
    Status,
    /// Client-side timeout
    Timeout,
    /// Connection refused or the request got no answer
    NoResponse,
    /// Anything else on the wire, including unreadable bodies
    Transport,
}

/// Lead and listings API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("API rejected the request: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    #[error("API returned HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("API request timed out")]
    Timeout,

    #[error("no response from API: {0}")]
    NoResponse(String),

    #[error("API transport failure: {0}")]
    Transport(String),

    #[error("unreadable API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a reqwest failure.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }
        if let Some(status) = err.status() {
            return Self::Status { status: status.as_u16(), message: None };
        }
        #[cfg(not(target_arch = "wasm32"))]
        if err.is_connect() {
            return Self::NoResponse(err.to_string());
        }
        if err.is_request() {
            return Self::NoResponse(err.to_string());
        }
        if err.is_decode() || err.is_body() {
            return Self::Decode(err.to_string());
        }
        Self::Transport(err.to_string())
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Rejected(_) => ApiErrorCategory::Rejected,
            Self::Status { .. } => ApiErrorCategory::Status,
            Self::Timeout => ApiErrorCategory::Timeout,
            Self::NoResponse(_) => ApiErrorCategory::NoResponse,
            Self::Transport(_) | Self::Decode(_) => ApiErrorCategory::Transport,
        }
    }

    /// Stable label suitable for logging.
    pub fn label(&self) -> &'static str {
        match self.category() {
            ApiErrorCategory::Rejected => "rejected",
            ApiErrorCategory::Status => "status",
            ApiErrorCategory::Timeout => "timeout",
            ApiErrorCategory::NoResponse => "no_response",
            ApiErrorCategory::Transport => "transport",
        }
    }
}

impl ApiError {
    /// Map onto the message shown to the person who filled in a form.
    ///
    /// `rejected_fallback` is used when a `success: false` envelope has no
    /// usable message; blank server messages count as missing.
    pub fn into_submission_error(self, rejected_fallback: &str) -> SubmissionError {
        match self {
            ApiError::Rejected(message) => SubmissionError::Rejected(
                non_blank(message).unwrap_or_else(|| rejected_fallback.to_string()),
            ),
            ApiError::Status { status, message } => SubmissionError::Server {
                status,
                message: non_blank(message).unwrap_or_else(|| format!("Server error: {status}")),
            },
            ApiError::Timeout => SubmissionError::Timeout,
            ApiError::NoResponse(_) => SubmissionError::NoResponse,
            ApiError::Transport(detail) | ApiError::Decode(detail) => {
                SubmissionError::Transport { detail }
            }
        }
    }
}

impl From<ApiError> for SubmissionError {
    fn from(err: ApiError) -> Self {
        err.into_submission_error(SUBMISSION_REJECTED_FALLBACK)
    }
}

impl From<ApiError> for AbacusError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected(message) => AbacusError::Remote(
                non_blank(message).unwrap_or_else(|| "API reported failure".to_string()),
            ),
            ApiError::Status { status, message } => {
                status_to_error(status, non_blank(message).as_deref())
            }
            ApiError::Timeout => AbacusError::Network("HTTP request timed out".into()),
            ApiError::NoResponse(detail) | ApiError::Transport(detail) => {
                AbacusError::Network(detail)
            }
            ApiError::Decode(detail) => AbacusError::Remote(detail),
        }
    }
}

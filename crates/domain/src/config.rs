//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS,
    DEFAULT_SUBMIT_TIMEOUT_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub calculator: CalculatorConfig,
}

/// Remote lead API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `https://api.example.com/api`
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client
    pub timeout_seconds: u64,
    /// Total attempts for idempotent reads (creates are always single-shot)
    pub max_attempts: usize,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            user_agent: None,
        }
    }
}

/// Calculator wizard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Upper bound on the lead submission before it is reported as timed out
    pub submit_timeout_seconds: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self { submit_timeout_seconds: DEFAULT_SUBMIT_TIMEOUT_SECS }
    }
}

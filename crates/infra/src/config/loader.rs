//! Configuration loader
//!
//! Loads application configuration from environment variables and files.
//!
//! ## Loading Strategy
//! 1. Start from an explicit config file, or the first probed one, or the
//!    built-in defaults when no file exists
//! 2. Overlay any environment variables that are set
//! 3. Validate the result (base URL, timeouts, attempts)
//!
//! Environment variables therefore win over file values, and file values win
//! over defaults.
//!
//! ## Environment Variables
//! - `ABACUS_API_BASE_URL`: Lead API base URL
//! - `ABACUS_API_TIMEOUT_SECONDS`: Per-request HTTP timeout
//! - `ABACUS_API_MAX_ATTEMPTS`: Attempts for idempotent reads
//! - `ABACUS_API_USER_AGENT`: User-Agent header override
//! - `ABACUS_SUBMIT_TIMEOUT_SECONDS`: Upper bound on a lead submission
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./abacus.json` or `./abacus.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use abacus_domain::{AbacusError, Config, Result};
use url::Url;

pub const ENV_API_BASE_URL: &str = "ABACUS_API_BASE_URL";
pub const ENV_API_TIMEOUT_SECONDS: &str = "ABACUS_API_TIMEOUT_SECONDS";
pub const ENV_API_MAX_ATTEMPTS: &str = "ABACUS_API_MAX_ATTEMPTS";
pub const ENV_API_USER_AGENT: &str = "ABACUS_API_USER_AGENT";
pub const ENV_SUBMIT_TIMEOUT_SECONDS: &str = "ABACUS_SUBMIT_TIMEOUT_SECONDS";

/// Load configuration with the layered strategy described above.
///
/// # Arguments
/// * `path` - Explicit config file. When `None`, [`probe_config_paths`] is
///   used and a missing file is not an error.
///
/// # Errors
/// Returns `AbacusError::Config` if:
/// - An explicit file does not exist or can not be parsed
/// - An environment variable holds an unparsable value
/// - The merged configuration fails validation
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path.or_else(probe_config_paths) {
        Some(path) => read_file(&path)?,
        None => {
            tracing::debug!("No config file found, starting from defaults");
            Config::default()
        }
    };

    let overridden = apply_env_overrides(&mut config)?;
    if overridden > 0 {
        tracing::info!(count = overridden, "Configuration overridden from environment variables");
    }

    validate(&config)?;
    Ok(config)
}

/// Load configuration from defaults plus environment variables only.
///
/// # Errors
/// Returns `AbacusError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AbacusError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid or the values fail validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p,
        None => probe_config_paths().ok_or_else(|| {
            AbacusError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    let config = read_file(&config_path)?;
    validate(&config)?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(AbacusError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AbacusError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`). Missing
/// sections and fields take their defaults.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AbacusError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AbacusError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AbacusError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Overlay environment variables onto `config`.
///
/// Returns how many variables were applied.
///
/// # Errors
/// Returns `AbacusError::Config` if a numeric variable does not parse.
pub fn apply_env_overrides(config: &mut Config) -> Result<usize> {
    let mut applied = 0;

    if let Some(base_url) = env_var(ENV_API_BASE_URL) {
        config.api.base_url = base_url;
        applied += 1;
    }
    if let Some(timeout) = env_parse::<u64>(ENV_API_TIMEOUT_SECONDS)? {
        config.api.timeout_seconds = timeout;
        applied += 1;
    }
    if let Some(attempts) = env_parse::<usize>(ENV_API_MAX_ATTEMPTS)? {
        config.api.max_attempts = attempts;
        applied += 1;
    }
    if let Some(agent) = env_var(ENV_API_USER_AGENT) {
        config.api.user_agent = Some(agent);
        applied += 1;
    }
    if let Some(timeout) = env_parse::<u64>(ENV_SUBMIT_TIMEOUT_SECONDS)? {
        config.calculator.submit_timeout_seconds = timeout;
        applied += 1;
    }

    Ok(applied)
}

/// Check that a configuration is usable.
///
/// # Errors
/// Returns `AbacusError::Config` naming the first offending setting.
pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(config.api.base_url.trim()).map_err(|e| {
        AbacusError::Config(format!("Invalid api.base_url '{}': {}", config.api.base_url, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AbacusError::Config(format!(
            "api.base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.api.timeout_seconds == 0 {
        return Err(AbacusError::Config("api.timeout_seconds must be at least 1".into()));
    }
    if config.api.max_attempts == 0 {
        return Err(AbacusError::Config("api.max_attempts must be at least 1".into()));
    }
    if config.calculator.submit_timeout_seconds == 0 {
        return Err(AbacusError::Config(
            "calculator.submit_timeout_seconds must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("abacus.json"),
            cwd.join("abacus.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("abacus.json"),
                exe_dir.join("abacus.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Read an environment variable, treating blank values as unset.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `AbacusError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AbacusError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

use std::time::Duration;

use abacus_domain::{AbacusError, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Map `-v` repetitions to a default filter directive.
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `verbosity` when set. Logs always go to stderr so
/// stdout stays clean for command output.
pub fn init_tracing(verbosity: u8, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(|e| AbacusError::Internal(format!("failed to install logger: {e}")))
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"leads::list_leads"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
///
/// Callers must avoid forwarding contact details in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, success, "command_execution_success");
    } else {
        warn!(command, duration_ms, success, "command_execution_failure");
    }
}

/// Convert an `AbacusError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &AbacusError) -> &'static str {
    match error {
        AbacusError::Config(_) => "config",
        AbacusError::Network(_) => "network",
        AbacusError::InvalidInput(_) => "invalid_input",
        AbacusError::NotFound(_) => "not_found",
        AbacusError::Remote(_) => "remote",
        AbacusError::Internal(_) => "internal",
    }
}

//! Abacus - office space calculator and lead pipeline CLI
//!
//! Main entry point for the command-line application.

#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use abacus_lib::utils::logging::init_tracing;
use abacus_lib::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging FIRST so we can see .env loading
    if let Err(e) = init_tracing(cli.verbose, cli.log_json) {
        eprintln!("{e}");
    }

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded .env from: {:?}", path),
        Err(e) => tracing::debug!("Could not load .env file: {}", e),
    }

    let mut stdout = std::io::stdout().lock();
    match abacus_lib::run(cli, &mut stdout).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

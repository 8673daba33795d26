#![allow(dead_code)]

use abacus_domain::{ApiConfig, CalculatorConfig, Config};
use abacus_lib::AppContext;
use clap::Parser;
use wiremock::MockServer;

/// Config pointing at the mock server with short timeouts and fast retries.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}/api", server.uri()),
            timeout_seconds: 2,
            max_attempts: 2,
            user_agent: Some("abacus-tests".into()),
        },
        calculator: CalculatorConfig { submit_timeout_seconds: 2 },
    }
}

pub fn context_for(server: &MockServer) -> AppContext {
    AppContext::new(config_for(server)).expect("app context")
}

/// Run a command line against `ctx`, returning the exit code and stdout.
pub async fn execute(ctx: &AppContext, args: &[&str]) -> anyhow::Result<(u8, String)> {
    let argv = std::iter::once("abacus").chain(args.iter().copied());
    let cli = abacus_lib::Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    let code = abacus_lib::execute(ctx, cli.command, cli.json, &mut out).await?;
    Ok((code, String::from_utf8(out)?))
}

pub const CONTACT_ARGS: [&str; 10] = [
    "--name",
    "Asha Rao",
    "--company",
    "Northwind Traders",
    "--designation",
    "Head of Workplace",
    "--phone",
    "+91 98450 00000",
    "--email",
    "asha@northwind.in",
];

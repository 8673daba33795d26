//! # Abacus App
//!
//! Command-line application layer - commands and main entry point.
//!
//! This crate contains:
//! - The clap command-line definition
//! - Commands over the calculator, listing catalog and lead pipeline services
//! - Application context (dependency injection)
//! - Logging setup and text rendering
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

use std::io::Write;

use abacus_core::{ListingWrite, ReportOutcome};
use serde::Serialize;

// Re-export for convenience
pub use cli::{Cli, Command, LeadsCommand, ListingsCommand};
pub use commands::*;
pub use context::*;

pub const EXIT_SUCCESS: u8 = 0;

/// Exit code used when a property report request could not be delivered.
pub const EXIT_SUBMISSION_FAILED: u8 = 1;

/// Exit code used when a wizard step or listing form refuses to advance.
pub const EXIT_VALIDATION: u8 = 2;

/// Execute a parsed command line, writing results to `out`. Returns the
/// process exit code.
///
/// Calculator submission failures are part of a successful run; validation
/// failures and undelivered report requests change the exit code.
/// Everything else surfaces as an error.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<u8> {
    let ctx = AppContext::load(cli.config.clone(), cli.api_url.as_deref())?;
    execute(&ctx, cli.command, cli.json, out).await
}

/// Execute a command against an already wired context.
pub async fn execute<W: Write>(
    ctx: &AppContext,
    command: Command,
    json: bool,
    out: &mut W,
) -> anyhow::Result<u8> {
    match command {
        Command::Estimate(space) => {
            let outcome = commands::estimate(ctx, &space.to_input())?;
            emit_outcome(&outcome, json, out)
        }
        Command::Calculate(args) => {
            let outcome =
                commands::calculate(ctx, &args.space.to_input(), args.contact.into()).await?;
            emit_outcome(&outcome, json, out)
        }
        Command::Leads { command: LeadsCommand::List(args) } => {
            let overview = commands::list_leads(ctx, &args.into()).await?;
            if json {
                emit_json(&overview, out)?;
            } else {
                writeln!(out, "{}", utils::render::overview(&overview))?;
            }
            Ok(EXIT_SUCCESS)
        }
        Command::Leads { command: LeadsCommand::Update(args) } => {
            let record = commands::update_lead(ctx, &args.id, &args.to_update()).await?;
            if json {
                emit_json(&record, out)?;
            } else {
                writeln!(out, "{}", utils::render::lead(&record))?;
            }
            Ok(EXIT_SUCCESS)
        }
        Command::Listings { command } => execute_listings(ctx, command, json, out).await,
    }
}

async fn execute_listings<W: Write>(
    ctx: &AppContext,
    command: ListingsCommand,
    json: bool,
    out: &mut W,
) -> anyhow::Result<u8> {
    use crate::utils::render;

    match command {
        ListingsCommand::List(args) => {
            let page = commands::list_listings(ctx, &args.into()).await?;
            emit(&page, json, out, render::listings)?;
        }
        ListingsCommand::Show { id } => {
            let listing = commands::show_listing(ctx, &id).await?;
            emit(&listing, json, out, render::listing)?;
        }
        ListingsCommand::Locations => {
            let names = commands::listing_locations(ctx).await?;
            emit(&names, json, out, |names| render::names("Locations", names))?;
        }
        ListingsCommand::Types => {
            let names = commands::listing_types(ctx).await?;
            emit(&names, json, out, |names| render::names("Types", names))?;
        }
        ListingsCommand::Create(args) => {
            let write = commands::create_listing(ctx, args.to_draft()).await?;
            return emit_write(&write, json, out);
        }
        ListingsCommand::Update(args) => {
            let write = commands::update_listing(ctx, &args.id, &args.to_changes()).await?;
            return emit_write(&write, json, out);
        }
        ListingsCommand::Delete { id } => {
            let deletion = commands::delete_listing(ctx, &id).await?;
            emit(&deletion, json, out, |deletion| render::deletion(&id, deletion))?;
        }
        ListingsCommand::Codes => {
            let stats = commands::property_codes(ctx).await?;
            emit(&stats, json, out, render::code_stats)?;
        }
        ListingsCommand::Report(args) => {
            let outcome = commands::report_listing(ctx, &args.id, args.contact.into()).await?;
            emit(&outcome, json, out, render::report_outcome)?;
            return Ok(match outcome {
                ReportOutcome::Requested { .. } => EXIT_SUCCESS,
                ReportOutcome::Failed { .. } => EXIT_SUBMISSION_FAILED,
                ReportOutcome::Invalid { .. } => EXIT_VALIDATION,
            });
        }
    }

    Ok(EXIT_SUCCESS)
}

fn emit_write<W: Write>(write: &ListingWrite, json: bool, out: &mut W) -> anyhow::Result<u8> {
    emit(write, json, out, utils::render::listing_write)?;
    Ok(if write.is_saved() { EXIT_SUCCESS } else { EXIT_VALIDATION })
}

fn emit<W: Write, T: Serialize>(
    value: &T,
    json: bool,
    out: &mut W,
    render: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        emit_json(value, out)
    } else {
        writeln!(out, "{}", render(value))?;
        Ok(())
    }
}

fn emit_outcome<W: Write>(
    outcome: &CalculationOutcome,
    json: bool,
    out: &mut W,
) -> anyhow::Result<u8> {
    if json {
        emit_json(outcome, out)?;
    } else {
        let text = match outcome {
            CalculationOutcome::Report(report) => utils::render::report(report),
            CalculationOutcome::Invalid { step, errors } => {
                utils::render::validation(*step, errors)
            }
        };
        writeln!(out, "{text}")?;
    }

    Ok(if outcome.is_valid() { EXIT_SUCCESS } else { EXIT_VALIDATION })
}

fn emit_json<W: Write, T: Serialize>(value: &T, out: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

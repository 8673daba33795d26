//! Calculator commands

use std::time::Instant;

use abacus_core::calculator::validate_space;
use abacus_core::{CalculationReport, SpaceCalculator, Step, ValidationErrors, WizardError};
use abacus_domain::{AbacusError, Category, ContactInfo, Result, Variant};
use serde::Serialize;
use tracing::debug;

use crate::context::{AppContext, DynLeadIntake};
use crate::utils::logging::log_command_execution;

/// Raw space inputs as typed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceInput {
    /// Free-text quantities; parsed leniently.
    pub quantities: Vec<(Category, String)>,
    pub variants: Vec<Variant>,
}

/// Result of running the calculator from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Report(CalculationReport),
    /// A step refused to advance.
    Invalid { step: Step, errors: ValidationErrors },
}

impl CalculationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}

/// Configure the space and return the breakdown without submitting.
pub fn estimate(ctx: &AppContext, input: &SpaceInput) -> Result<CalculationOutcome> {
    let command_name = "calculator::estimate";
    let start = Instant::now();

    let result = run_estimate(ctx.calculator(), input);

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

fn run_estimate(mut wizard: SpaceCalculator, input: &SpaceInput) -> Result<CalculationOutcome> {
    configure(&mut wizard, input).map_err(internal)?;

    match validate_space(wizard.space()) {
        Ok(()) => Ok(CalculationOutcome::Report(wizard.preview())),
        Err(errors) => Ok(CalculationOutcome::Invalid { step: wizard.step(), errors }),
    }
}

/// Run all three wizard steps: configure, enter contact, submit, results.
///
/// A failed submission still produces a report; the failure is recorded on
/// it. Only validation stops the run early.
pub async fn calculate(
    ctx: &AppContext,
    input: &SpaceInput,
    contact: ContactInfo,
) -> Result<CalculationOutcome> {
    let command_name = "calculator::calculate";
    let start = Instant::now();

    let result = run_calculate(ctx, input, contact).await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());
    result
}

async fn run_calculate(
    ctx: &AppContext,
    input: &SpaceInput,
    contact: ContactInfo,
) -> Result<CalculationOutcome> {
    let mut wizard = ctx.calculator();
    configure(&mut wizard, input).map_err(internal)?;

    let intake = ctx.intake.as_ref();
    if let Some(invalid) = advance(&mut wizard, intake).await? {
        return Ok(invalid);
    }
    wizard.set_contact(contact).map_err(internal)?;
    if let Some(invalid) = advance(&mut wizard, intake).await? {
        return Ok(invalid);
    }

    wizard
        .report()
        .cloned()
        .map(CalculationOutcome::Report)
        .ok_or_else(|| AbacusError::Internal("calculator finished without a report".into()))
}

/// Advance one step, turning validation failures into an outcome.
async fn advance(
    wizard: &mut SpaceCalculator,
    intake: &DynLeadIntake,
) -> Result<Option<CalculationOutcome>> {
    match wizard.advance(intake).await {
        Ok(_) => Ok(None),
        Err(WizardError::Validation(errors)) => {
            debug!(step = %wizard.step(), issues = errors.len(), "step refused to advance");
            Ok(Some(CalculationOutcome::Invalid { step: wizard.step(), errors }))
        }
        Err(err) => Err(internal(err)),
    }
}

fn configure(
    wizard: &mut SpaceCalculator,
    input: &SpaceInput,
) -> std::result::Result<(), WizardError> {
    for variant in &input.variants {
        wizard.set_variant(*variant)?;
    }
    for (category, raw) in &input.quantities {
        wizard.set_quantity_input(*category, raw)?;
    }
    Ok(())
}

fn internal(err: WizardError) -> AbacusError {
    AbacusError::Internal(err.to_string())
}

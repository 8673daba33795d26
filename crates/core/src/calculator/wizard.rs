//! The calculator wizard state machine

use std::fmt;
use std::time::{Duration, Instant};

use abacus_domain::constants::DEFAULT_SUBMIT_TIMEOUT_SECS;
use abacus_domain::{Category, ContactField, ContactInfo, LeadSubmission, SpaceRequest, Variant};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::input::parse_quantity;
use super::report::{CalculationReport, SubmissionOutcome};
use super::validation::{validate_contact, validate_space, ValidationErrors, ValidationIssue};
use crate::leads::ports::{LeadIntake, SubmissionError};

/// Wizard step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    ConfiguringSpace,
    EnteringContact,
    ShowingResults,
}

impl Step {
    /// 1-based position shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::ConfiguringSpace => 1,
            Self::EnteringContact => 2,
            Self::ShowingResults => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::ConfiguringSpace => "Configure Space",
            Self::EnteringContact => "Contact Details",
            Self::ShowingResults => "Results",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConfiguringSpace => "configuring_space",
            Self::EnteringContact => "entering_contact",
            Self::ShowingResults => "showing_results",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The operation does not apply to the current step.
    #[error("cannot {action} while in step {step}")]
    NotAllowed { action: &'static str, step: Step },

    /// The current step's inputs are incomplete; the wizard did not move.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// One calculator session.
///
/// Holds the space request, the contact details, the current step and the
/// validation issues for that step. Every mutation takes `&mut self`, so a
/// session can have at most one submission in flight.
#[derive(Debug, Clone)]
pub struct SpaceCalculator {
    step: Step,
    space: SpaceRequest,
    contact: ContactInfo,
    errors: Vec<ValidationIssue>,
    report: Option<CalculationReport>,
    submit_timeout: Duration,
}

impl Default for SpaceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceCalculator {
    pub fn new() -> Self {
        Self {
            step: Step::ConfiguringSpace,
            space: SpaceRequest::new(),
            contact: ContactInfo::default(),
            errors: Vec::new(),
            report: None,
            submit_timeout: Duration::from_secs(DEFAULT_SUBMIT_TIMEOUT_SECS),
        }
    }

    /// Upper bound on how long `advance` waits for the lead intake.
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn space(&self) -> &SpaceRequest {
        &self.space
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Issues from the last failed `advance`, minus any cleared by edits since.
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// First issue attached to `field`, for inline display under the input.
    pub fn field_error(&self, field: ContactField) -> Option<ValidationIssue> {
        self.errors.iter().copied().find(|issue| issue.field_key() == field.key())
    }

    /// Report produced when the wizard entered the results step.
    pub fn report(&self) -> Option<&CalculationReport> {
        self.report.as_ref()
    }

    /// Breakdown for the current inputs, without any submission outcome.
    pub fn preview(&self) -> CalculationReport {
        CalculationReport::compute(&self.space, &self.contact)
    }

    pub fn total_area(&self) -> u64 {
        self.space.total_area()
    }

    // ------------------------------------------------------------------
    // Step 1 inputs
    // ------------------------------------------------------------------

    pub fn set_quantity(&mut self, category: Category, quantity: u32) -> Result<(), WizardError> {
        self.require(Step::ConfiguringSpace, "change quantities")?;
        self.space.set_quantity(category, quantity);
        self.space_changed();
        Ok(())
    }

    /// Set a quantity from raw text input; see [`parse_quantity`].
    pub fn set_quantity_input(&mut self, category: Category, input: &str) -> Result<(), WizardError> {
        self.set_quantity(category, parse_quantity(input))
    }

    pub fn increment(&mut self, category: Category) -> Result<(), WizardError> {
        self.require(Step::ConfiguringSpace, "change quantities")?;
        self.space.increment(category);
        self.space_changed();
        Ok(())
    }

    pub fn decrement(&mut self, category: Category) -> Result<(), WizardError> {
        self.require(Step::ConfiguringSpace, "change quantities")?;
        self.space.decrement(category);
        self.space_changed();
        Ok(())
    }

    pub fn set_variant(&mut self, variant: Variant) -> Result<(), WizardError> {
        self.require(Step::ConfiguringSpace, "change variants")?;
        self.space.set_variant(variant);
        self.space_changed();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Step 2 inputs
    // ------------------------------------------------------------------

    pub fn set_contact_field(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.require(Step::EnteringContact, "edit contact details")?;
        self.contact.set(field, value);
        self.errors.retain(|issue| issue.field_key() != field.key());
        Ok(())
    }

    /// Replace every contact field at once.
    pub fn set_contact(&mut self, contact: ContactInfo) -> Result<(), WizardError> {
        self.require(Step::EnteringContact, "edit contact details")?;
        self.contact = contact;
        self.errors.retain(|issue| matches!(issue, ValidationIssue::IncompleteConfiguration));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Move forward one step.
    ///
    /// From the contact step this submits the lead through `intake` and then
    /// moves to the results regardless of how the submission went; the
    /// outcome is recorded on the report. In the results step this is a
    /// no-op and never submits again.
    pub async fn advance<I>(&mut self, intake: &I) -> Result<Step, WizardError>
    where
        I: LeadIntake + ?Sized,
    {
        match self.step {
            Step::ConfiguringSpace => {
                self.check(validate_space(&self.space))?;
                self.step = Step::EnteringContact;
            }
            Step::EnteringContact => {
                self.check(validate_contact(&self.contact))?;

                let submission = LeadSubmission::new(self.contact.clone(), self.space.clone());
                let outcome = self.submit(intake, &submission).await;
                self.report = Some(
                    CalculationReport::compute(&self.space, &self.contact).with_submission(outcome),
                );
                self.step = Step::ShowingResults;
            }
            Step::ShowingResults => {
                debug!("advance ignored, results already shown");
                return Ok(self.step);
            }
        }

        debug!(step = %self.step, "wizard advanced");
        Ok(self.step)
    }

    /// Return from the contact step to the space step. Data is kept and
    /// errors are cleared.
    pub fn back(&mut self) -> Result<Step, WizardError> {
        self.require(Step::EnteringContact, "go back")?;
        self.errors.clear();
        self.step = Step::ConfiguringSpace;
        Ok(self.step)
    }

    /// Start over from any step.
    pub fn reset(&mut self) {
        self.space.reset();
        self.contact.clear();
        self.errors.clear();
        self.report = None;
        self.step = Step::ConfiguringSpace;
        debug!("wizard reset");
    }

    fn require(&self, step: Step, action: &'static str) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::NotAllowed { action, step: self.step })
        }
    }

    fn check(&mut self, result: Result<(), ValidationErrors>) -> Result<(), WizardError> {
        match result {
            Ok(()) => {
                self.errors.clear();
                Ok(())
            }
            Err(errors) => {
                self.errors = errors.issues().to_vec();
                debug!(step = %self.step, issues = errors.len(), "step validation failed");
                Err(errors.into())
            }
        }
    }

    fn space_changed(&mut self) {
        self.errors.retain(|issue| !matches!(issue, ValidationIssue::IncompleteConfiguration));
    }

    async fn submit<I>(&self, intake: &I, submission: &LeadSubmission) -> SubmissionOutcome
    where
        I: LeadIntake + ?Sized,
    {
        let start = Instant::now();
        let result = tokio::time::timeout(self.submit_timeout, intake.create_lead(submission))
            .await
            .unwrap_or(Err(SubmissionError::Timeout));
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(lead) => {
                info!(
                    lead_id = lead.id.as_deref().unwrap_or("-"),
                    total_area = submission.total_area(),
                    duration_ms,
                    "lead submitted"
                );
                SubmissionOutcome::Submitted(lead)
            }
            Err(err) => {
                warn!(
                    error_type = err.label(),
                    total_area = submission.total_area(),
                    duration_ms,
                    "lead submission failed, showing results without it"
                );
                SubmissionOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use abacus_domain::{CreatedLead, WorkstationSize};
    use async_trait::async_trait;

    use super::*;

    struct FixedIntake {
        result: Result<CreatedLead, SubmissionError>,
        calls: AtomicUsize,
    }

    impl FixedIntake {
        fn ok() -> Self {
            Self {
                result: Ok(CreatedLead { id: Some("lead-1".into()), ..CreatedLead::default() }),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: SubmissionError) -> Self {
            Self { result: Err(err), calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LeadIntake for FixedIntake {
        async fn create_lead(
            &self,
            _submission: &LeadSubmission,
        ) -> Result<CreatedLead, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn contact() -> ContactInfo {
        ContactInfo {
            name: "Asha Rao".into(),
            company: "Northwind".into(),
            designation: "COO".into(),
            phone: "98450 00000".into(),
            email: "asha@northwind.in".into(),
        }
    }

    async fn at_contact_step(intake: &FixedIntake) -> SpaceCalculator {
        let mut wizard = SpaceCalculator::new();
        wizard.set_quantity(Category::Cabins, 1).unwrap();
        wizard.advance(intake).await.unwrap();
        wizard
    }

    #[tokio::test]
    async fn empty_space_blocks_first_step() {
        let intake = FixedIntake::ok();
        let mut wizard = SpaceCalculator::new();

        let err = wizard.advance(&intake).await.unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(wizard.step(), Step::ConfiguringSpace);
        assert_eq!(wizard.errors(), &[ValidationIssue::IncompleteConfiguration]);
    }

    #[tokio::test]
    async fn space_change_clears_incomplete_configuration() {
        let intake = FixedIntake::ok();
        let mut wizard = SpaceCalculator::new();
        let _ = wizard.advance(&intake).await;

        wizard.set_variant(Variant::Workstation(WorkstationSize::Spacious)).unwrap();
        assert!(wizard.errors().is_empty());
    }

    #[tokio::test]
    async fn contact_edit_clears_only_that_field() {
        let intake = FixedIntake::ok();
        let mut wizard = at_contact_step(&intake).await;
        let _ = wizard.advance(&intake).await;
        assert_eq!(wizard.errors().len(), 5);

        wizard.set_contact_field(ContactField::Email, "bad").unwrap();
        assert_eq!(wizard.errors().len(), 4);
        assert_eq!(wizard.field_error(ContactField::Email), None);
        assert_eq!(
            wizard.field_error(ContactField::Name),
            Some(ValidationIssue::MissingField(ContactField::Name))
        );
        assert_eq!(intake.calls(), 0);
    }

    #[tokio::test]
    async fn inputs_are_locked_outside_their_step() {
        let intake = FixedIntake::ok();
        let mut wizard = SpaceCalculator::new();
        assert!(matches!(
            wizard.set_contact_field(ContactField::Name, "x"),
            Err(WizardError::NotAllowed { step: Step::ConfiguringSpace, .. })
        ));

        let mut wizard = at_contact_step(&intake).await;
        assert!(wizard.increment(Category::Cabins).is_err());
        assert_eq!(wizard.space().quantity(Category::Cabins), 1);
    }

    #[tokio::test]
    async fn successful_submission_reaches_results() {
        let intake = FixedIntake::ok();
        let mut wizard = at_contact_step(&intake).await;
        wizard.set_contact(contact()).unwrap();

        assert_eq!(wizard.advance(&intake).await.unwrap(), Step::ShowingResults);
        let report = wizard.report().unwrap();
        assert_eq!(report.total_area, 160);
        assert!(report.submission.as_ref().unwrap().is_success());
        assert_eq!(intake.calls(), 1);
    }

    #[tokio::test]
    async fn failed_submission_still_shows_results() {
        let intake = FixedIntake::failing(SubmissionError::NoResponse);
        let mut wizard = at_contact_step(&intake).await;
        wizard.set_contact(contact()).unwrap();

        assert_eq!(wizard.advance(&intake).await.unwrap(), Step::ShowingResults);
        let outcome = wizard.report().unwrap().submission.clone().unwrap();
        assert_eq!(outcome, SubmissionOutcome::Failed(SubmissionError::NoResponse));
    }

    #[tokio::test]
    async fn advance_in_results_does_not_resubmit() {
        let intake = FixedIntake::ok();
        let mut wizard = at_contact_step(&intake).await;
        wizard.set_contact(contact()).unwrap();
        wizard.advance(&intake).await.unwrap();

        assert_eq!(wizard.advance(&intake).await.unwrap(), Step::ShowingResults);
        assert_eq!(intake.calls(), 1);
        assert!(wizard.back().is_err());
    }

    #[tokio::test]
    async fn back_keeps_data_and_clears_errors() {
        let intake = FixedIntake::ok();
        let mut wizard = at_contact_step(&intake).await;
        wizard.set_contact_field(ContactField::Name, "Asha").unwrap();
        let _ = wizard.advance(&intake).await;
        assert!(!wizard.errors().is_empty());

        assert_eq!(wizard.back().unwrap(), Step::ConfiguringSpace);
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.contact().name, "Asha");
        assert_eq!(wizard.space().quantity(Category::Cabins), 1);
    }

    #[test]
    fn quantity_text_input_is_parsed_leniently() {
        let mut wizard = SpaceCalculator::new();
        wizard.set_quantity_input(Category::Workstations, "12abc").unwrap();
        wizard.set_quantity_input(Category::Cabins, "-4").unwrap();
        assert_eq!(wizard.space().quantity(Category::Workstations), 12);
        assert_eq!(wizard.space().quantity(Category::Cabins), 0);
        assert_eq!(wizard.total_area(), 300);
    }
}

//! Three-step job-application wizard: personal info, experience, review.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::application::{ApplicationDraft, ApplicationField};
use super::review::ReviewSummary;
use super::validation::FieldErrors;
use crate::api::{ApplicationPayload, BackendError, PortalBackend};

pub const CONSENT_REQUIRED_MESSAGE: &str = "Please accept the consent to continue";
pub const SUBMIT_REJECTED_MESSAGE: &str = "Failed to submit application";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit application. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    PersonalInfo,
    Experience,
    Review,
    Submitting,
    Success,
}

impl WizardState {
    /// 1-based step shown in the progress indicator.
    pub const fn step_number(self) -> u8 {
        match self {
            WizardState::PersonalInfo => 1,
            WizardState::Experience => 2,
            WizardState::Review | WizardState::Submitting | WizardState::Success => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WizardState::PersonalInfo => "personal information",
            WizardState::Experience => "experience",
            WizardState::Review => "review",
            WizardState::Submitting => "submitting",
            WizardState::Success => "success",
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Edit,
    Advance,
    Back,
    Submit,
    Complete,
    Reset,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardAction::Edit => "edit",
            WizardAction::Advance => "advance",
            WizardAction::Back => "back",
            WizardAction::Submit => "submit",
            WizardAction::Complete => "complete",
            WizardAction::Reset => "reset",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("personal information is incomplete: {0}")]
    Validation(FieldErrors<ApplicationField>),
    #[error("Please accept the consent to continue")]
    ConsentRequired,
    #[error("cannot {action} while on the {state} step")]
    InvalidTransition {
        state: WizardState,
        action: WizardAction,
    },
    #[error("{0}")]
    Submission(String),
}

/// The step on which a field's input control is shown.
fn owning_state(field: ApplicationField) -> WizardState {
    match field {
        ApplicationField::FirstName
        | ApplicationField::LastName
        | ApplicationField::Email
        | ApplicationField::Phone
        | ApplicationField::CountryOfBirth
        | ApplicationField::DateOfBirth
        | ApplicationField::Address
        | ApplicationField::City
        | ApplicationField::State
        | ApplicationField::ZipCode => WizardState::PersonalInfo,
        ApplicationField::YearsExperience
        | ApplicationField::CdlClass
        | ApplicationField::CdlExpiration
        | ApplicationField::PreviousJobs => WizardState::Experience,
        ApplicationField::Message => WizardState::Review,
    }
}

/// One form session. Owns the draft and drives it to submission.
pub struct FormWizard<B: ?Sized> {
    backend: Arc<B>,
    state: WizardState,
    draft: ApplicationDraft,
    errors: FieldErrors<ApplicationField>,
    review: Option<ReviewSummary>,
    notice: Option<String>,
}

impl<B> FormWizard<B>
where
    B: PortalBackend + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: WizardState::PersonalInfo,
            draft: ApplicationDraft::default(),
            errors: FieldErrors::default(),
            review: None,
            notice: None,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors<ApplicationField> {
        &self.errors
    }

    /// Summary assembled when the review step was entered.
    pub fn review(&self) -> Option<&ReviewSummary> {
        self.review.as_ref()
    }

    /// Last user-visible message (blocked submit, server error, ...).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Only the review step accepts a submit; the control is disabled while a
    /// request is in flight.
    pub fn submit_enabled(&self) -> bool {
        self.state == WizardState::Review
    }

    /// Applies an edit to a field shown on the current step and clears that
    /// field's annotation.
    pub fn set_field(&mut self, field: ApplicationField, value: &str) -> Result<(), WizardError> {
        if owning_state(field) != self.state {
            return Err(self.invalid(WizardAction::Edit));
        }

        self.draft.set(field, value);
        self.errors.clear(field);
        if self.state == WizardState::Review {
            self.review = Some(ReviewSummary::from_draft(&self.draft));
        }
        Ok(())
    }

    pub fn set_consent(&mut self, consent: bool) -> Result<(), WizardError> {
        if self.state != WizardState::Review {
            return Err(self.invalid(WizardAction::Edit));
        }
        self.draft.consent = consent;
        if consent && self.notice.as_deref() == Some(CONSENT_REQUIRED_MESSAGE) {
            self.notice = None;
        }
        Ok(())
    }

    /// Forward transition. Leaving personal info re-runs its validation.
    pub fn advance(&mut self) -> Result<WizardState, WizardError> {
        match self.state {
            WizardState::PersonalInfo => {
                let errors = self.draft.validate_personal_info();
                if !errors.is_empty() {
                    debug!(failing = errors.len(), "personal information failed validation");
                    self.errors = errors.clone();
                    return Err(WizardError::Validation(errors));
                }
                self.errors = FieldErrors::default();
                self.enter(WizardState::Experience);
            }
            WizardState::Experience => {
                self.review = Some(ReviewSummary::from_draft(&self.draft));
                self.enter(WizardState::Review);
            }
            _ => return Err(self.invalid(WizardAction::Advance)),
        }
        Ok(self.state)
    }

    /// Backward transition; the draft is preserved.
    pub fn back(&mut self) -> Result<WizardState, WizardError> {
        match self.state {
            WizardState::Experience => self.enter(WizardState::PersonalInfo),
            WizardState::Review => self.enter(WizardState::Experience),
            _ => return Err(self.invalid(WizardAction::Back)),
        }
        Ok(self.state)
    }

    /// Guards the submit and moves to `Submitting`, returning the payload to
    /// send. Without consent nothing is sent and the wizard stays on review.
    pub fn begin_submission(&mut self) -> Result<ApplicationPayload, WizardError> {
        if self.state != WizardState::Review {
            return Err(self.invalid(WizardAction::Submit));
        }
        if !self.draft.consent {
            self.notice = Some(CONSENT_REQUIRED_MESSAGE.to_string());
            return Err(WizardError::ConsentRequired);
        }

        self.notice = None;
        self.enter(WizardState::Submitting);
        Ok(self.draft.to_payload())
    }

    /// Applies the backend's answer to an in-flight submission.
    pub fn complete_submission(
        &mut self,
        outcome: Result<(), BackendError>,
    ) -> Result<WizardState, WizardError> {
        if self.state != WizardState::Submitting {
            return Err(self.invalid(WizardAction::Complete));
        }

        match outcome {
            Ok(()) => {
                info!("job application submitted");
                self.draft = ApplicationDraft::default();
                self.review = None;
                self.errors = FieldErrors::default();
                self.enter(WizardState::Success);
                Ok(self.state)
            }
            Err(err) => {
                warn!(error = %err, "job application submission failed");
                let message = err.user_message(SUBMIT_REJECTED_MESSAGE, SUBMIT_FAILED_MESSAGE);
                self.notice = Some(message.clone());
                self.enter(WizardState::Review);
                Err(WizardError::Submission(message))
            }
        }
    }

    /// Submits the draft and waits for the backend's answer.
    pub async fn submit(&mut self) -> Result<WizardState, WizardError> {
        let payload = self.begin_submission()?;
        let outcome = self.backend.create_application(&payload).await;
        self.complete_submission(outcome)
    }

    /// Starts a fresh session from any settled state.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.state == WizardState::Submitting {
            return Err(self.invalid(WizardAction::Reset));
        }
        self.draft = ApplicationDraft::default();
        self.errors = FieldErrors::default();
        self.review = None;
        self.notice = None;
        self.enter(WizardState::PersonalInfo);
        Ok(())
    }

    fn enter(&mut self, next: WizardState) {
        debug!(from = %self.state, to = %next, "wizard transition");
        self.state = next;
    }

    fn invalid(&self, action: WizardAction) -> WizardError {
        WizardError::InvalidTransition {
            state: self.state,
            action,
        }
    }
}

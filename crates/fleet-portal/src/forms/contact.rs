use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::phone::{digits_only, format_phone};
use super::validation::FieldErrors;
use crate::api::{BackendError, ContactPayload, PortalBackend};

pub const CONTACT_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    CompanyName,
    Position,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContactField::FirstName => "First Name",
            ContactField::LastName => "Last Name",
            ContactField::Email => "Email Address",
            ContactField::Phone => "Phone Number",
            ContactField::CompanyName => "Company Name",
            ContactField::Position => "Position",
            ContactField::Message => "Your Message",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub position: String,
    pub message: String,
    pub sms_consent: bool,
}

impl ContactDraft {
    pub fn set(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => {
                self.phone = format_phone(value);
                return;
            }
            ContactField::CompanyName => &mut self.company_name,
            ContactField::Position => &mut self.position,
            ContactField::Message => &mut self.message,
        };
        *slot = value.to_string();
    }

    /// Only first name, email and message are required; the phone is free-form.
    pub fn validate(&self) -> FieldErrors<ContactField> {
        let mut errors = FieldErrors::default();
        errors.require(ContactField::FirstName, &self.first_name);
        errors.require_email(ContactField::Email, &self.email);
        errors.require(ContactField::Message, &self.message);
        errors
    }

    pub fn to_payload(&self) -> ContactPayload {
        ContactPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: digits_only(&self.phone),
            company_name: self.company_name.trim().to_string(),
            position: self.position.trim().to_string(),
            message: self.message.trim().to_string(),
            sms_consent: self.sms_consent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFormState {
    Editing,
    Submitting,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("contact form is incomplete: {0}")]
    Validation(FieldErrors<ContactField>),
    #[error("a message is already being sent")]
    AlreadySubmitting,
    #[error("no message is being sent")]
    NotSubmitting,
    #[error("{0}")]
    Submission(String),
}

/// Single-step contact form; consent is optional.
pub struct ContactForm<B: ?Sized> {
    backend: Arc<B>,
    state: ContactFormState,
    draft: ContactDraft,
    errors: FieldErrors<ContactField>,
    alert: Option<String>,
}

impl<B> ContactForm<B>
where
    B: PortalBackend + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: ContactFormState::Editing,
            draft: ContactDraft::default(),
            errors: FieldErrors::default(),
            alert: None,
        }
    }

    pub fn state(&self) -> ContactFormState {
        self.state
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors<ContactField> {
        &self.errors
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.state != ContactFormState::Submitting
    }

    /// Editing after a successful send starts a new message.
    pub fn set_field(&mut self, field: ContactField, value: &str) {
        if self.state == ContactFormState::Success {
            self.state = ContactFormState::Editing;
        }
        self.draft.set(field, value);
        self.errors.clear(field);
    }

    pub fn set_sms_consent(&mut self, consent: bool) {
        self.draft.sms_consent = consent;
    }

    pub fn begin_submission(&mut self) -> Result<ContactPayload, ContactError> {
        if self.state == ContactFormState::Submitting {
            return Err(ContactError::AlreadySubmitting);
        }

        let errors = self.draft.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(ContactError::Validation(errors));
        }

        self.errors = FieldErrors::default();
        self.alert = None;
        self.state = ContactFormState::Submitting;
        Ok(self.draft.to_payload())
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<(), BackendError>,
    ) -> Result<ContactFormState, ContactError> {
        if self.state != ContactFormState::Submitting {
            return Err(ContactError::NotSubmitting);
        }

        match outcome {
            Ok(()) => {
                info!("contact message sent");
                self.draft = ContactDraft::default();
                self.state = ContactFormState::Success;
                Ok(self.state)
            }
            Err(err) => {
                warn!(error = %err, "contact message failed");
                self.alert = Some(CONTACT_FAILED_MESSAGE.to_string());
                self.state = ContactFormState::Editing;
                Err(ContactError::Submission(CONTACT_FAILED_MESSAGE.to_string()))
            }
        }
    }

    pub async fn submit(&mut self) -> Result<ContactFormState, ContactError> {
        let payload = self.begin_submission()?;
        let outcome = self.backend.create_contact(&payload).await;
        self.complete_submission(outcome)
    }
}

use std::sync::Arc;

use crate::api::{BackendError, InMemoryBackend};
use crate::forms::application::ApplicationField;
use crate::forms::contact::{ContactField, ContactForm};
use crate::forms::wizard::{FormWizard, WizardState};

pub(super) fn backend() -> Arc<InMemoryBackend> {
    Arc::new(InMemoryBackend::default())
}

pub(super) fn server_error(detail: &str) -> BackendError {
    BackendError::Rejected {
        status: 500,
        detail: Some(detail.to_string()),
    }
}

pub(super) fn connection_refused() -> BackendError {
    BackendError::Transport("connection refused".to_string())
}

pub(super) fn fill_personal_info(wizard: &mut FormWizard<InMemoryBackend>) {
    let fields = [
        (ApplicationField::FirstName, "Dana"),
        (ApplicationField::LastName, "Whitfield"),
        (ApplicationField::Email, "dana.whitfield@example.com"),
        (ApplicationField::Phone, "(555) 123-4567"),
    ];
    for (field, value) in fields {
        wizard.set_field(field, value).expect("personal field editable");
    }
}

pub(super) fn fill_experience(wizard: &mut FormWizard<InMemoryBackend>) {
    let fields = [
        (ApplicationField::YearsExperience, "3"),
        (ApplicationField::CdlClass, "A"),
        (ApplicationField::CdlExpiration, "2027-04-30"),
        (ApplicationField::PreviousJobs, "Regional flatbed, 2019-2024"),
    ];
    for (field, value) in fields {
        wizard.set_field(field, value).expect("experience field editable");
    }
}

/// Wizard sitting on the review step with a complete draft.
pub(super) fn wizard_on_review(backend: &Arc<InMemoryBackend>) -> FormWizard<InMemoryBackend> {
    let mut wizard = FormWizard::new(backend.clone());
    fill_personal_info(&mut wizard);
    wizard.advance().expect("personal info valid");
    fill_experience(&mut wizard);
    wizard.advance().expect("experience step advances");
    assert_eq!(wizard.state(), WizardState::Review);
    wizard
}

pub(super) fn filled_contact_form(backend: &Arc<InMemoryBackend>) -> ContactForm<InMemoryBackend> {
    let mut form = ContactForm::new(backend.clone());
    form.set_field(ContactField::FirstName, "Morgan");
    form.set_field(ContactField::LastName, "Pryce");
    form.set_field(ContactField::Email, "morgan@shipperco.example");
    form.set_field(ContactField::Phone, "5559876543");
    form.set_field(ContactField::CompanyName, "ShipperCo");
    form.set_field(ContactField::Message, "Looking for weekly reefer capacity");
    form
}

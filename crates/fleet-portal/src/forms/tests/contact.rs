use super::common::*;
use crate::api::Operation;
use crate::forms::contact::{
    ContactError, ContactField, ContactForm, ContactFormState, CONTACT_FAILED_MESSAGE,
};

#[tokio::test]
async fn contact_success_clears_the_form() {
    let backend = backend();
    let mut form = filled_contact_form(&backend);
    form.set_sms_consent(true);

    assert_eq!(form.submit().await, Ok(ContactFormState::Success));
    assert!(form.draft().first_name.is_empty());
    assert!(!form.draft().sms_consent);

    let stored = backend.contacts();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].phone.as_deref(), Some("5559876543"));
    assert_eq!(stored[0].company_name.as_deref(), Some("ShipperCo"));
    assert!(stored[0].sms_consent);
}

#[tokio::test]
async fn contact_failure_keeps_the_draft_and_alerts() {
    let backend = backend();
    backend.inject(Operation::CreateContact, server_error("smtp relay down"));
    let mut form = filled_contact_form(&backend);
    let draft_before = form.draft().clone();

    assert_eq!(
        form.submit().await,
        Err(ContactError::Submission(CONTACT_FAILED_MESSAGE.to_string()))
    );
    assert_eq!(form.state(), ContactFormState::Editing);
    assert_eq!(form.draft(), &draft_before);
    assert_eq!(form.alert(), Some(CONTACT_FAILED_MESSAGE));
    assert!(form.submit_enabled());
}

#[tokio::test]
async fn invalid_contact_never_reaches_the_backend() {
    let backend = backend();
    let mut form = ContactForm::new(backend.clone());
    form.set_field(ContactField::FirstName, "Morgan");
    form.set_field(ContactField::Email, "morgan@localhost");

    match form.submit().await {
        Err(ContactError::Validation(errors)) => {
            assert!(errors.get(ContactField::Email).is_some());
            assert!(errors.get(ContactField::Message).is_some());
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(backend.calls().is_empty());
    assert_eq!(form.state(), ContactFormState::Editing);
}

#[test]
fn contact_completion_requires_an_in_flight_send() {
    let backend = backend();
    let mut form = filled_contact_form(&backend);

    assert_eq!(form.complete_submission(Ok(())), Err(ContactError::NotSubmitting));
    form.begin_submission().expect("valid draft");
    assert_eq!(form.begin_submission(), Err(ContactError::AlreadySubmitting));
    assert!(!form.submit_enabled());
}

#[tokio::test]
async fn editing_after_success_starts_a_new_message() {
    let backend = backend();
    let mut form = filled_contact_form(&backend);
    form.submit().await.expect("sent");

    form.set_field(ContactField::FirstName, "Avery");
    assert_eq!(form.state(), ContactFormState::Editing);
}

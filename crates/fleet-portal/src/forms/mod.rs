//! Careers and contact forms: drafts, validation, review and submission.

pub mod application;
pub mod contact;
pub mod phone;
pub mod review;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use application::{ApplicationDraft, ApplicationField, CdlClass, ExperienceLevel};
pub use contact::{ContactDraft, ContactError, ContactField, ContactForm, ContactFormState};
pub use phone::{digits_only, format_phone, is_valid_phone};
pub use review::{experience_label, ReviewEntry, ReviewSummary, NOT_PROVIDED};
pub use validation::{is_valid_email, FieldErrors};
pub use wizard::{FormWizard, WizardAction, WizardError, WizardState};

use serde::Serialize;

use super::application::{ApplicationDraft, ExperienceLevel};

pub const NOT_PROVIDED: &str = "Not provided";

/// Experience code to display label; unknown or absent codes are "Not provided".
pub fn experience_label(code: &str) -> &'static str {
    ExperienceLevel::from_code(code)
        .map(ExperienceLevel::label)
        .unwrap_or(NOT_PROVIDED)
}

/// Read-only summary rendered on the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country_of_birth: String,
    pub date_of_birth: String,
    pub address: String,
    pub locality: String,
    pub years_experience: String,
    pub cdl_class: String,
    pub cdl_expiration: String,
    pub previous_jobs: String,
    pub message: String,
}

/// One labelled line of the summary, grouped by section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewEntry<'a> {
    pub section: &'static str,
    pub label: &'static str,
    pub value: &'a str,
}

impl<'a> ReviewEntry<'a> {
    const fn new(section: &'static str, label: &'static str, value: &'a str) -> Self {
        Self {
            section,
            label,
            value,
        }
    }
}

impl ReviewSummary {
    pub fn from_draft(draft: &ApplicationDraft) -> Self {
        let locality = [&draft.city, &draft.state, &draft.zip_code]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            name: format!("{} {}", draft.first_name.trim(), draft.last_name.trim())
                .trim()
                .to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.clone(),
            country_of_birth: or_not_provided(&draft.country_of_birth),
            date_of_birth: or_not_provided(&draft.date_of_birth),
            address: or_not_provided(&draft.address),
            locality: or_not_provided(&locality),
            years_experience: experience_label(&draft.years_experience).to_string(),
            cdl_class: draft
                .cdl()
                .map(|class| format!("Class {}", class.code()))
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
            cdl_expiration: or_not_provided(&draft.cdl_expiration),
            previous_jobs: or_not_provided(&draft.previous_jobs),
            message: or_not_provided(&draft.message),
        }
    }

    pub fn entries(&self) -> Vec<ReviewEntry<'_>> {
        const PERSONAL: &str = "Personal Information";
        const ADDRESS: &str = "Address";
        const EXPERIENCE: &str = "Driving Experience";
        const EMPLOYMENT: &str = "Previous Employment";
        const ADDITIONAL: &str = "Additional Information";

        vec![
            ReviewEntry::new(PERSONAL, "Name", &self.name),
            ReviewEntry::new(PERSONAL, "Email", &self.email),
            ReviewEntry::new(PERSONAL, "Phone", &self.phone),
            ReviewEntry::new(PERSONAL, "Country of Birth", &self.country_of_birth),
            ReviewEntry::new(PERSONAL, "Date of Birth", &self.date_of_birth),
            ReviewEntry::new(ADDRESS, "Street", &self.address),
            ReviewEntry::new(ADDRESS, "City / State / ZIP", &self.locality),
            ReviewEntry::new(EXPERIENCE, "Years of Experience", &self.years_experience),
            ReviewEntry::new(EXPERIENCE, "CDL Class", &self.cdl_class),
            ReviewEntry::new(EXPERIENCE, "CDL Expiration", &self.cdl_expiration),
            ReviewEntry::new(EMPLOYMENT, "Previous Jobs", &self.previous_jobs),
            ReviewEntry::new(ADDITIONAL, "Message", &self.message),
        ]
    }
}

fn or_not_provided(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        trimmed.to_string()
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use super::phone::{digits_only, format_phone};
use super::validation::FieldErrors;
use crate::api::ApplicationPayload;

/// Inputs collected by the job-application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationField {
    FirstName,
    LastName,
    Email,
    Phone,
    CountryOfBirth,
    DateOfBirth,
    Address,
    City,
    State,
    ZipCode,
    YearsExperience,
    CdlClass,
    CdlExpiration,
    PreviousJobs,
    Message,
}

impl ApplicationField {
    /// Fields that must pass validation before leaving the personal-info step.
    pub const PERSONAL_REQUIRED: [ApplicationField; 4] = [
        ApplicationField::FirstName,
        ApplicationField::LastName,
        ApplicationField::Email,
        ApplicationField::Phone,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationField::FirstName => "First Name",
            ApplicationField::LastName => "Last Name",
            ApplicationField::Email => "Email Address",
            ApplicationField::Phone => "Phone Number",
            ApplicationField::CountryOfBirth => "Country of Birth",
            ApplicationField::DateOfBirth => "Date of Birth",
            ApplicationField::Address => "Address",
            ApplicationField::City => "City",
            ApplicationField::State => "State",
            ApplicationField::ZipCode => "ZIP Code",
            ApplicationField::YearsExperience => "Years of Experience",
            ApplicationField::CdlClass => "CDL Class",
            ApplicationField::CdlExpiration => "CDL Expiration",
            ApplicationField::PreviousJobs => "Previous Employment",
            ApplicationField::Message => "Additional Information",
        }
    }
}

impl fmt::Display for ApplicationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Driving-experience bracket offered by the form's select control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    LessThanOne,
    OneToTwo,
    ThreeToFive,
    FiveToTen,
    TenPlus,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 5] = [
        ExperienceLevel::LessThanOne,
        ExperienceLevel::OneToTwo,
        ExperienceLevel::ThreeToFive,
        ExperienceLevel::FiveToTen,
        ExperienceLevel::TenPlus,
    ];

    /// Wire value (the lower bound of the bracket, in years).
    pub const fn years(self) -> u8 {
        match self {
            ExperienceLevel::LessThanOne => 0,
            ExperienceLevel::OneToTwo => 1,
            ExperienceLevel::ThreeToFive => 3,
            ExperienceLevel::FiveToTen => 5,
            ExperienceLevel::TenPlus => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::LessThanOne => "Less than 1 year",
            ExperienceLevel::OneToTwo => "1-2 years",
            ExperienceLevel::ThreeToFive => "3-5 years",
            ExperienceLevel::FiveToTen => "5-10 years",
            ExperienceLevel::TenPlus => "10+ years",
        }
    }

    /// Only the exact select codes are recognized.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.years().to_string() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CdlClass {
    A,
    B,
    C,
}

impl CdlClass {
    pub const fn code(self) -> &'static str {
        match self {
            CdlClass::A => "A",
            CdlClass::B => "B",
            CdlClass::C => "C",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => Some(CdlClass::A),
            "B" => Some(CdlClass::B),
            "C" => Some(CdlClass::C),
            _ => None,
        }
    }
}

/// Client-held, not-yet-submitted job application.
///
/// Values are kept exactly as the form controls hold them; typing and
/// normalization happen when the payload is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Display-formatted; see [`format_phone`].
    pub phone: String,
    pub country_of_birth: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub years_experience: String,
    pub cdl_class: String,
    pub cdl_expiration: String,
    pub previous_jobs: String,
    pub message: String,
    pub consent: bool,
}

impl ApplicationDraft {
    pub fn value(&self, field: ApplicationField) -> &str {
        match field {
            ApplicationField::FirstName => &self.first_name,
            ApplicationField::LastName => &self.last_name,
            ApplicationField::Email => &self.email,
            ApplicationField::Phone => &self.phone,
            ApplicationField::CountryOfBirth => &self.country_of_birth,
            ApplicationField::DateOfBirth => &self.date_of_birth,
            ApplicationField::Address => &self.address,
            ApplicationField::City => &self.city,
            ApplicationField::State => &self.state,
            ApplicationField::ZipCode => &self.zip_code,
            ApplicationField::YearsExperience => &self.years_experience,
            ApplicationField::CdlClass => &self.cdl_class,
            ApplicationField::CdlExpiration => &self.cdl_expiration,
            ApplicationField::PreviousJobs => &self.previous_jobs,
            ApplicationField::Message => &self.message,
        }
    }

    /// Applies one keystroke-level edit. The phone field is reformatted.
    pub fn set(&mut self, field: ApplicationField, value: &str) {
        let slot = match field {
            ApplicationField::FirstName => &mut self.first_name,
            ApplicationField::LastName => &mut self.last_name,
            ApplicationField::Email => &mut self.email,
            ApplicationField::Phone => {
                self.phone = format_phone(value);
                return;
            }
            ApplicationField::CountryOfBirth => &mut self.country_of_birth,
            ApplicationField::DateOfBirth => &mut self.date_of_birth,
            ApplicationField::Address => &mut self.address,
            ApplicationField::City => &mut self.city,
            ApplicationField::State => &mut self.state,
            ApplicationField::ZipCode => &mut self.zip_code,
            ApplicationField::YearsExperience => &mut self.years_experience,
            ApplicationField::CdlClass => &mut self.cdl_class,
            ApplicationField::CdlExpiration => &mut self.cdl_expiration,
            ApplicationField::PreviousJobs => &mut self.previous_jobs,
            ApplicationField::Message => &mut self.message,
        };
        *slot = value.to_string();
    }

    pub fn experience(&self) -> Option<ExperienceLevel> {
        ExperienceLevel::from_code(&self.years_experience)
    }

    pub fn cdl(&self) -> Option<CdlClass> {
        CdlClass::from_code(&self.cdl_class)
    }

    /// Personal-info rules: every field is re-checked on each attempt.
    pub fn validate_personal_info(&self) -> FieldErrors<ApplicationField> {
        let mut errors = FieldErrors::default();
        errors.require(ApplicationField::FirstName, &self.first_name);
        errors.require(ApplicationField::LastName, &self.last_name);
        errors.require_email(ApplicationField::Email, &self.email);
        errors.require_phone(ApplicationField::Phone, &self.phone);
        errors
    }

    pub fn to_payload(&self) -> ApplicationPayload {
        ApplicationPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: digits_only(&self.phone),
            country_of_birth: non_empty(&self.country_of_birth),
            date_of_birth: non_empty(&self.date_of_birth),
            address: non_empty(&self.address),
            city: non_empty(&self.city),
            state: non_empty(&self.state),
            zip_code: non_empty(&self.zip_code),
            years_experience: self.experience().map(ExperienceLevel::years),
            cdl_class: self.cdl().map(|class| class.code().to_string()),
            cdl_expiration: non_empty(&self.cdl_expiration),
            previous_jobs: non_empty(&self.previous_jobs),
            message: non_empty(&self.message),
        }
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

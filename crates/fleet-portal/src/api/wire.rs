use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recruiting-pipeline stage of an application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Interview,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Interview,
        ApplicationStatus::Hired,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Hired => "Hired",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}' (expected pending, reviewed, interview, hired or rejected)")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.label() == normalized)
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

/// Body of `POST /api/applications`.
///
/// Core optional fields are sent as explicit `null`s; the extended
/// address/birth fields are omitted entirely when not collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    pub years_experience: Option<u8>,
    pub cdl_class: Option<String>,
    pub cdl_expiration: Option<String>,
    pub previous_jobs: Option<String>,
    pub message: Option<String>,
}

/// Server-owned application as returned by the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub country_of_birth: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub cdl_class: Option<String>,
    #[serde(default)]
    pub cdl_expiration: Option<String>,
    #[serde(default)]
    pub previous_jobs: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApplicationRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Body of `PATCH /api/applications/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub position: String,
    pub message: String,
    pub sms_consent: bool,
}

/// Server-owned contact message; read-only from the console's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: u64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    pub message: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub sms_consent: bool,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ContactRecord {
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.trim().is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Error envelope returned with non-2xx responses.
///
/// `detail` is a plain string for business failures but a structured list
/// for request validation failures, so it is kept untyped here.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub(crate) detail: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    pub(crate) fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// Accepts RFC 3339 timestamps as well as the naive ones some stores emit.
/// Anything unparseable degrades to `None` rather than failing the record.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// The contact table stores consent as 0/1; accept either that or a bool.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Int(value)) => value != 0,
        None => false,
    })
}

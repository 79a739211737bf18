use async_trait::async_trait;

use super::wire::{
    ApplicationId, ApplicationPayload, ApplicationRecord, ApplicationStatus, ContactPayload,
    ContactRecord, HealthStatus,
};

/// The careers/contact backend contract, so forms and the console can be
/// driven by HTTP or by an in-memory double.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    async fn create_application(&self, payload: &ApplicationPayload) -> Result<(), BackendError>;

    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>, BackendError>;

    async fn fetch_application(&self, id: ApplicationId)
        -> Result<ApplicationRecord, BackendError>;

    async fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), BackendError>;

    async fn create_contact(&self, payload: &ContactPayload) -> Result<(), BackendError>;

    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, BackendError>;

    async fn health(&self) -> Result<HealthStatus, BackendError>;
}

/// Failure talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("backend unreachable: {0}")]
    Transport(String),
    /// Non-2xx response; `detail` carries the server's message when it sent one.
    #[error("backend rejected request with status {status}{}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },
    /// 2xx response whose body did not match the contract.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

impl BackendError {
    /// Message shown to the user: the server's detail verbatim when present,
    /// otherwise the caller's fallback for the failure class.
    pub fn user_message(&self, rejected_fallback: &str, transport_fallback: &str) -> String {
        match self {
            BackendError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            BackendError::Rejected { detail: None, .. } | BackendError::Decode(_) => {
                rejected_fallback.to_string()
            }
            BackendError::Transport(_) => transport_fallback.to_string(),
        }
    }
}

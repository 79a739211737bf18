//! reqwest-backed implementation of the portal backend contract.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::backend::{BackendError, PortalBackend};
use super::wire::{
    ApplicationId, ApplicationPayload, ApplicationRecord, ApplicationStatus, ContactPayload,
    ContactRecord, ErrorEnvelope, HealthStatus, StatusUpdate,
};
use crate::config::ApiConfig;

/// HTTP client for the `/api/applications` and `/api/contact` endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|err| {
            warn!(error = %err, "backend request failed before a response arrived");
            BackendError::Transport(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // An unreadable or non-JSON error body still counts as a rejection.
        let envelope = response
            .json::<ErrorEnvelope>()
            .await
            .unwrap_or_default();
        let detail = envelope.into_message();
        warn!(status = status.as_u16(), detail = ?detail, "backend rejected request");

        Err(BackendError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json::<T>()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))
    }
}

#[async_trait]
impl PortalBackend for HttpBackend {
    async fn create_application(&self, payload: &ApplicationPayload) -> Result<(), BackendError> {
        let url = self.url("/api/applications");
        info!(url = %url, "submitting job application");
        self.send(self.client.post(&url).json(payload)).await?;
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>, BackendError> {
        let url = self.url("/api/applications");
        debug!(url = %url, "loading applications");
        let response = self.send(self.client.get(&url)).await?;
        let records: Vec<ApplicationRecord> = Self::decode(response).await?;
        info!(count = records.len(), "loaded applications");
        Ok(records)
    }

    async fn fetch_application(
        &self,
        id: ApplicationId,
    ) -> Result<ApplicationRecord, BackendError> {
        let url = self.url(&format!("/api/applications/{id}"));
        debug!(url = %url, "loading application");
        let response = self.send(self.client.get(&url)).await?;
        Self::decode(response).await
    }

    async fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), BackendError> {
        let url = self.url(&format!("/api/applications/{id}/status"));
        info!(url = %url, %status, "updating application status");
        self.send(self.client.patch(&url).json(&StatusUpdate { status }))
            .await?;
        Ok(())
    }

    async fn create_contact(&self, payload: &ContactPayload) -> Result<(), BackendError> {
        let url = self.url("/api/contact");
        info!(url = %url, "submitting contact message");
        self.send(self.client.post(&url).json(payload)).await?;
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, BackendError> {
        let url = self.url("/api/contact");
        debug!(url = %url, "loading contact messages");
        let response = self.send(self.client.get(&url)).await?;
        let records: Vec<ContactRecord> = Self::decode(response).await?;
        info!(count = records.len(), "loaded contact messages");
        Ok(records)
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let url = self.url("/api/health");
        let response = self.send(self.client.get(&url)).await?;
        Self::decode(response).await
    }
}

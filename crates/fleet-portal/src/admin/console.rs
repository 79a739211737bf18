use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::api::{
    ApplicationId, ApplicationRecord, ApplicationStatus, BackendError, ContactRecord,
    PortalBackend, UnknownStatus,
};

pub const STATUS_UPDATE_FAILED_MESSAGE: &str = "Failed to update status";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminTab {
    Applications,
    Contacts,
}

impl fmt::Display for AdminTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminTab::Applications => f.write_str("applications"),
            AdminTab::Contacts => f.write_str("contacts"),
        }
    }
}

/// Client-side filter over the application list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(self, record: &ApplicationRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => record.status == status,
        }
    }
}

impl From<Option<ApplicationStatus>> for StatusFilter {
    fn from(value: Option<ApplicationStatus>) -> Self {
        value.map(StatusFilter::Only).unwrap_or_default()
    }
}

/// `""` and `"all"` mean no filter; anything else must name a status.
impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

/// Counters shown above the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_applications: usize,
    pub pending_count: usize,
    pub interview_count: usize,
    pub contact_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    #[error("{message} (application {id})")]
    StatusUpdate { id: ApplicationId, message: String },
}

/// Admin dashboard over the submitted applications and contact messages.
///
/// Holds a transient view only: every tab or filter change re-fetches.
pub struct AdminConsole<B: ?Sized> {
    backend: Arc<B>,
    tab: AdminTab,
    filter: StatusFilter,
    applications: Vec<ApplicationRecord>,
    contacts: Vec<ContactRecord>,
    stats: DashboardStats,
    alert: Option<String>,
}

impl<B> AdminConsole<B>
where
    B: PortalBackend + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            tab: AdminTab::Applications,
            filter: StatusFilter::All,
            applications: Vec::new(),
            contacts: Vec::new(),
            stats: DashboardStats::default(),
            alert: None,
        }
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Applications matching the active filter.
    pub fn applications(&self) -> &[ApplicationRecord] {
        &self.applications
    }

    pub fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    /// Blocking alert raised by the last failed mutation.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub async fn select_tab(&mut self, tab: AdminTab) -> Result<(), BackendError> {
        self.tab = tab;
        self.reload().await
    }

    pub async fn set_status_filter(&mut self, filter: StatusFilter) -> Result<(), BackendError> {
        self.filter = filter;
        self.reload().await
    }

    /// Fetch-then-replace for the active tab. A failed load is logged and
    /// leaves the current view untouched.
    pub async fn reload(&mut self) -> Result<(), BackendError> {
        let result = match self.tab {
            AdminTab::Applications => self.load_applications().await,
            AdminTab::Contacts => self.load_contacts().await,
        };

        if let Err(err) = &result {
            warn!(tab = %self.tab, error = %err, "admin list failed to load");
        }
        result
    }

    async fn load_applications(&mut self) -> Result<(), BackendError> {
        let records = self.backend.list_applications().await?;

        self.stats.total_applications = records.len();
        self.stats.pending_count = count_status(&records, ApplicationStatus::Pending);
        self.stats.interview_count = count_status(&records, ApplicationStatus::Interview);

        let filter = self.filter;
        self.applications = records
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        info!(
            shown = self.applications.len(),
            total = self.stats.total_applications,
            %filter,
            "applications loaded"
        );
        Ok(())
    }

    async fn load_contacts(&mut self) -> Result<(), BackendError> {
        let records = self.backend.list_contacts().await?;
        self.stats.contact_count = records.len();
        self.contacts = records;
        info!(total = self.stats.contact_count, "contact messages loaded");
        Ok(())
    }

    /// Single-field status change. Success reloads the list; failure raises
    /// the alert and leaves the view as it was.
    pub async fn update_status(
        &mut self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), AdminError> {
        match self.backend.update_application_status(id, status).await {
            Ok(()) => {
                info!(%id, %status, "application status updated");
                self.alert = None;
                // The update stands even if the refresh fails; that is logged.
                let _ = self.reload().await;
                Ok(())
            }
            Err(err) => {
                warn!(%id, %status, error = %err, "application status update failed");
                self.alert = Some(STATUS_UPDATE_FAILED_MESSAGE.to_string());
                Err(AdminError::StatusUpdate {
                    id,
                    message: STATUS_UPDATE_FAILED_MESSAGE.to_string(),
                })
            }
        }
    }
}

fn count_status(records: &[ApplicationRecord], status: ApplicationStatus) -> usize {
    records
        .iter()
        .filter(|record| record.status == status)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApplicationPayload, ContactPayload, InMemoryBackend, Operation};

    fn payload(first_name: &str, last_name: &str) -> ApplicationPayload {
        ApplicationPayload {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: "5551234567".to_string(),
            country_of_birth: None,
            date_of_birth: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            years_experience: Some(5),
            cdl_class: Some("A".to_string()),
            cdl_expiration: None,
            previous_jobs: None,
            message: None,
        }
    }

    fn seeded() -> (Arc<InMemoryBackend>, ApplicationId) {
        let backend = Arc::new(InMemoryBackend::default());
        let pending = backend.seed_application(&payload("Ada", "Cole"), ApplicationStatus::Pending);
        backend.seed_application(&payload("Bo", "Reyes"), ApplicationStatus::Interview);
        backend.seed_application(&payload("Cy", "Ngata"), ApplicationStatus::Hired);
        (backend, pending)
    }

    #[tokio::test]
    async fn interview_filter_narrows_the_list_but_not_the_stats() {
        let (backend, _) = seeded();
        let mut console = AdminConsole::new(backend.clone());

        console
            .set_status_filter(StatusFilter::Only(ApplicationStatus::Interview))
            .await
            .expect("applications load");
        assert_eq!(console.applications().len(), 1);
        assert!(console
            .applications()
            .iter()
            .all(|record| record.status == ApplicationStatus::Interview));
        assert_eq!(console.stats().total_applications, 3);
        assert_eq!(console.stats().pending_count, 1);
        assert_eq!(console.stats().interview_count, 1);

        console
            .set_status_filter(StatusFilter::All)
            .await
            .expect("applications load");
        assert_eq!(console.applications().len(), 3);
    }

    #[tokio::test]
    async fn status_update_refetches_the_list() {
        let (backend, pending) = seeded();
        let mut console = AdminConsole::new(backend.clone());
        console.reload().await.expect("applications load");

        console
            .update_status(pending, ApplicationStatus::Interview)
            .await
            .expect("update accepted");

        assert_eq!(
            backend.calls(),
            vec![
                Operation::ListApplications,
                Operation::UpdateStatus,
                Operation::ListApplications,
            ]
        );
        assert_eq!(console.stats().interview_count, 2);
        assert_eq!(console.stats().pending_count, 0);
    }

    #[tokio::test]
    async fn failed_status_update_leaves_the_list_and_raises_an_alert() {
        let (backend, pending) = seeded();
        let mut console = AdminConsole::new(backend.clone());
        console.reload().await.expect("applications load");
        let before = console.applications().to_vec();

        backend.inject(
            Operation::UpdateStatus,
            BackendError::Transport("connection reset".to_string()),
        );
        let result = console.update_status(pending, ApplicationStatus::Hired).await;

        assert_eq!(
            result,
            Err(AdminError::StatusUpdate {
                id: pending,
                message: STATUS_UPDATE_FAILED_MESSAGE.to_string(),
            })
        );
        assert_eq!(console.applications(), before.as_slice());
        assert_eq!(console.alert(), Some(STATUS_UPDATE_FAILED_MESSAGE));
        assert_eq!(backend.count_calls(Operation::ListApplications), 1);

        console.dismiss_alert();
        assert_eq!(console.alert(), None);
    }

    #[tokio::test]
    async fn failed_load_keeps_the_previous_view() {
        let (backend, _) = seeded();
        let mut console = AdminConsole::new(backend.clone());
        console.reload().await.expect("applications load");

        backend.inject(
            Operation::ListApplications,
            BackendError::Rejected {
                status: 503,
                detail: None,
            },
        );
        assert!(console.reload().await.is_err());
        assert_eq!(console.applications().len(), 3);
        assert_eq!(console.alert(), None);
    }

    #[tokio::test]
    async fn contacts_tab_counts_messages() {
        let backend = Arc::new(InMemoryBackend::default());
        backend
            .create_contact(&ContactPayload {
                first_name: "Lee".to_string(),
                last_name: String::new(),
                email: "lee@example.com".to_string(),
                phone: String::new(),
                company_name: String::new(),
                position: String::new(),
                message: "Do you haul hazmat?".to_string(),
                sms_consent: false,
            })
            .await
            .expect("contact stored");
        let mut console = AdminConsole::new(backend.clone());

        console
            .select_tab(AdminTab::Contacts)
            .await
            .expect("contacts load");
        assert_eq!(console.tab(), AdminTab::Contacts);
        assert_eq!(console.contacts().len(), 1);
        assert_eq!(console.contacts()[0].full_name(), "Lee");
        assert_eq!(console.stats().contact_count, 1);
        assert_eq!(console.stats().total_applications, 0);
    }

    #[test]
    fn status_filter_parses_all_and_named_statuses() {
        assert_eq!("".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "interview".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(ApplicationStatus::Interview))
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}

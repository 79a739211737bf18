use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::backend::{BackendError, PortalBackend};
use super::wire::{
    ApplicationId, ApplicationPayload, ApplicationRecord, ApplicationStatus, ContactPayload,
    ContactRecord, HealthStatus,
};

/// Backend operations, used to record traffic and to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateApplication,
    ListApplications,
    FetchApplication,
    UpdateStatus,
    CreateContact,
    ListContacts,
    Health,
}

#[derive(Debug, Default)]
struct Store {
    applications: Vec<ApplicationRecord>,
    contacts: Vec<ContactRecord>,
    next_application_id: u64,
    next_contact_id: u64,
    calls: Vec<Operation>,
    faults: HashMap<Operation, BackendError>,
}

/// Process-local stand-in for the careers backend, for demos and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
}

impl InMemoryBackend {
    fn lock(&self) -> MutexGuard<'_, Store> {
        // A poisoned store only means another caller panicked mid-update;
        // the data itself is still usable.
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every call to `operation` fails with `error` until cleared.
    pub fn inject(&self, operation: Operation, error: BackendError) {
        self.lock().faults.insert(operation, error);
    }

    pub fn clear_faults(&self) {
        self.lock().faults.clear();
    }

    /// Operations received so far, in order.
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    pub fn count_calls(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    pub fn applications(&self) -> Vec<ApplicationRecord> {
        self.lock().applications.clone()
    }

    pub fn contacts(&self) -> Vec<ContactRecord> {
        self.lock().contacts.clone()
    }

    /// Stores a record as if it had been submitted, returning its id.
    pub fn seed_application(
        &self,
        payload: &ApplicationPayload,
        status: ApplicationStatus,
    ) -> ApplicationId {
        let mut store = self.lock();
        let id = Self::insert_application(&mut store, payload);
        if let Some(record) = store.applications.iter_mut().find(|record| record.id == id) {
            record.status = status;
        }
        id
    }

    fn begin(&self, operation: Operation) -> Result<MutexGuard<'_, Store>, BackendError> {
        let mut store = self.lock();
        store.calls.push(operation);
        if let Some(error) = store.faults.get(&operation).cloned() {
            return Err(error);
        }
        Ok(store)
    }

    fn insert_application(store: &mut Store, payload: &ApplicationPayload) -> ApplicationId {
        store.next_application_id += 1;
        let id = ApplicationId(store.next_application_id);
        store.applications.push(ApplicationRecord {
            id,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            country_of_birth: payload.country_of_birth.clone(),
            date_of_birth: payload.date_of_birth.clone(),
            address: payload.address.clone(),
            city: payload.city.clone(),
            state: payload.state.clone(),
            zip_code: payload.zip_code.clone(),
            years_experience: payload.years_experience.map(u32::from),
            cdl_class: payload.cdl_class.clone(),
            cdl_expiration: payload.cdl_expiration.clone(),
            previous_jobs: payload.previous_jobs.clone(),
            message: payload.message.clone(),
            status: ApplicationStatus::Pending,
            created_at: Some(Utc::now()),
            updated_at: None,
        });
        id
    }

    fn not_found() -> BackendError {
        BackendError::Rejected {
            status: 404,
            detail: Some("Application not found".to_string()),
        }
    }
}

#[async_trait]
impl PortalBackend for InMemoryBackend {
    async fn create_application(&self, payload: &ApplicationPayload) -> Result<(), BackendError> {
        let mut store = self.begin(Operation::CreateApplication)?;
        Self::insert_application(&mut store, payload);
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationRecord>, BackendError> {
        let store = self.begin(Operation::ListApplications)?;
        // Newest first, like the real listing.
        Ok(store.applications.iter().rev().cloned().collect())
    }

    async fn fetch_application(
        &self,
        id: ApplicationId,
    ) -> Result<ApplicationRecord, BackendError> {
        let store = self.begin(Operation::FetchApplication)?;
        store
            .applications
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), BackendError> {
        let mut store = self.begin(Operation::UpdateStatus)?;
        let record = store
            .applications
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(Self::not_found)?;
        record.status = status;
        record.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn create_contact(&self, payload: &ContactPayload) -> Result<(), BackendError> {
        let mut store = self.begin(Operation::CreateContact)?;
        store.next_contact_id += 1;
        let id = store.next_contact_id;
        store.contacts.push(ContactRecord {
            id,
            first_name: payload.first_name.clone(),
            last_name: Some(payload.last_name.clone()).filter(|value| !value.is_empty()),
            email: payload.email.clone(),
            phone: Some(payload.phone.clone()).filter(|value| !value.is_empty()),
            company_name: Some(payload.company_name.clone()).filter(|value| !value.is_empty()),
            position: Some(payload.position.clone()).filter(|value| !value.is_empty()),
            message: payload.message.clone(),
            sms_consent: payload.sms_consent,
            created_at: Some(Utc::now()),
        });
        Ok(())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, BackendError> {
        let store = self.begin(Operation::ListContacts)?;
        Ok(store.contacts.iter().rev().cloned().collect())
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        self.begin(Operation::Health)?;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            service: Some("in-memory".to_string()),
        })
    }
}

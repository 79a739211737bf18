//! Backend contract consumed by the forms and the admin console.

pub mod backend;
pub mod http;
pub mod memory;
pub mod wire;

pub use backend::{BackendError, PortalBackend};
pub use http::HttpBackend;
pub use memory::{InMemoryBackend, Operation};
pub use wire::{
    ApplicationId, ApplicationPayload, ApplicationRecord, ApplicationStatus, ContactPayload,
    ContactRecord, HealthStatus, StatusUpdate, UnknownStatus,
};

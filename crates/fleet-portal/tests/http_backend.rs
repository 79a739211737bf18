use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use fleet_portal::admin::{AdminConsole, AdminTab, StatusFilter};
use fleet_portal::api::{
    ApplicationId, ApplicationStatus, BackendError, ContactPayload, HttpBackend, PortalBackend,
    StatusUpdate,
};
use fleet_portal::config::ApiConfig;
use fleet_portal::forms::{
    ApplicationField, ContactField, ContactForm, ContactFormState, FormWizard, WizardError,
    WizardState,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Default)]
struct StubState {
    applications: Vec<Value>,
    contacts: Vec<Value>,
    reject_applications: Option<(StatusCode, Value)>,
    reject_status_updates: bool,
    status_patches: usize,
}

type Shared = Arc<Mutex<StubState>>;

async fn list_applications(State(state): State<Shared>) -> Json<Value> {
    let state = state.lock().expect("stub state");
    Json(Value::Array(state.applications.iter().rev().cloned().collect()))
}

async fn create_application(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().expect("stub state");
    if let Some((status, detail)) = state.reject_applications.clone() {
        return (status, Json(json!({ "detail": detail }))).into_response();
    }

    let mut record = body;
    let id = state.applications.len() as u64 + 1;
    record["id"] = json!(id);
    record["status"] = json!("pending");
    // Naive timestamps, as the backend's ORM emits them.
    record["created_at"] = json!("2026-10-17T08:30:00.123456");
    record["updated_at"] = Value::Null;
    state.applications.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn fetch_application(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let state = state.lock().expect("stub state");
    match state.applications.iter().find(|record| record["id"] == json!(id)) {
        Some(record) => Json(record.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Application not found" })),
        )
            .into_response(),
    }
}

async fn update_status(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(update): Json<StatusUpdate>,
) -> Response {
    let mut state = state.lock().expect("stub state");
    state.status_patches += 1;
    if state.reject_status_updates {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    match state
        .applications
        .iter_mut()
        .find(|record| record["id"] == json!(id))
    {
        Some(record) => {
            record["status"] = json!(update.status);
            Json(json!({ "message": "Status updated" })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Application not found" })),
        )
            .into_response(),
    }
}

async fn list_contacts(State(state): State<Shared>) -> Json<Value> {
    let state = state.lock().expect("stub state");
    Json(Value::Array(state.contacts.iter().rev().cloned().collect()))
}

async fn create_contact(State(state): State<Shared>, Json(body): Json<ContactPayload>) -> Response {
    let mut state = state.lock().expect("stub state");
    let id = state.contacts.len() as u64 + 1;
    // Stored with snake_case columns and an integer consent flag.
    let record = json!({
        "id": id,
        "first_name": body.first_name,
        "last_name": body.last_name,
        "email": body.email,
        "phone": body.phone,
        "company_name": body.company_name,
        "position": body.position,
        "message": body.message,
        "sms_consent": i32::from(body.sms_consent),
        "created_at": "2026-10-17 09:00:00",
    });
    state.contacts.push(record);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Contact form submitted successfully" })),
    )
        .into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "careers-api" }))
}

async fn spawn_stub() -> (Shared, HttpBackend) {
    let state: Shared = Arc::new(Mutex::new(StubState::default()));
    let app = Router::new()
        .route(
            "/api/applications",
            get(list_applications).post(create_application),
        )
        .route("/api/applications/:id", get(fetch_application))
        .route("/api/applications/:id/status", patch(update_status))
        .route("/api/contact", get(list_contacts).post(create_contact))
        .route("/api/health", get(health))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let address = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    let base_url = ApiConfig::parse_base_url(&format!("http://{address}/")).expect("stub url");
    let mut config = ApiConfig::new(base_url);
    config.timeout = Some(Duration::from_secs(5));
    let backend = HttpBackend::new(&config).expect("client builds");
    (state, backend)
}

async fn submit_application(backend: Arc<HttpBackend>) -> Result<WizardState, WizardError> {
    let mut wizard = FormWizard::new(backend);
    for (field, value) in [
        (ApplicationField::FirstName, "Dana"),
        (ApplicationField::LastName, "Whitfield"),
        (ApplicationField::Email, "dana@example.com"),
        (ApplicationField::Phone, "555.123.4567"),
        (ApplicationField::City, "Amarillo"),
    ] {
        wizard.set_field(field, value)?;
    }
    wizard.advance()?;
    wizard.set_field(ApplicationField::YearsExperience, "10")?;
    wizard.set_field(ApplicationField::CdlClass, "B")?;
    wizard.advance()?;
    wizard.set_consent(true)?;
    wizard.submit().await
}

#[tokio::test]
async fn wizard_posts_the_application_contract() {
    let (state, backend) = spawn_stub().await;
    let backend = Arc::new(backend);

    assert_eq!(
        submit_application(backend.clone()).await,
        Ok(WizardState::Success)
    );

    let stored = state.lock().expect("stub state").applications[0].clone();
    assert_eq!(stored["phone"], json!("5551234567"));
    assert_eq!(stored["years_experience"], json!(10));
    assert_eq!(stored["cdl_class"], json!("B"));
    assert_eq!(stored["city"], json!("Amarillo"));
    assert_eq!(stored["message"], Value::Null);
    assert!(stored.get("zip_code").is_none());

    let records = backend.list_applications().await.expect("list decodes");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ApplicationStatus::Pending);
    assert!(records[0].created_at.is_some());

    let fetched = backend
        .fetch_application(records[0].id)
        .await
        .expect("detail decodes");
    assert_eq!(fetched.full_name(), "Dana Whitfield");
}

#[tokio::test]
async fn server_detail_is_shown_verbatim() {
    let (state, backend) = spawn_stub().await;
    state.lock().expect("stub state").reject_applications = Some((
        StatusCode::INTERNAL_SERVER_ERROR,
        json!("Failed to submit application: disk full"),
    ));

    assert_eq!(
        submit_application(Arc::new(backend)).await,
        Err(WizardError::Submission(
            "Failed to submit application: disk full".to_string()
        ))
    );
}

#[tokio::test]
async fn structured_validation_detail_falls_back_to_generic_message() {
    let (state, backend) = spawn_stub().await;
    state.lock().expect("stub state").reject_applications = Some((
        StatusCode::UNPROCESSABLE_ENTITY,
        json!([{ "loc": ["body", "email"], "msg": "value is not a valid email address" }]),
    ));

    assert_eq!(
        submit_application(Arc::new(backend)).await,
        Err(WizardError::Submission(
            "Failed to submit application".to_string()
        ))
    );
}

#[tokio::test]
async fn missing_application_is_a_rejection() {
    let (_, backend) = spawn_stub().await;

    assert_eq!(
        backend.fetch_application(ApplicationId(42)).await,
        Err(BackendError::Rejected {
            status: 404,
            detail: Some("Application not found".to_string()),
        })
    );
}

#[tokio::test]
async fn contact_form_round_trips_through_the_console() {
    let (_, backend) = spawn_stub().await;
    let backend = Arc::new(backend);

    let mut form = ContactForm::new(backend.clone());
    form.set_field(ContactField::FirstName, "Morgan");
    form.set_field(ContactField::Email, "morgan@shipperco.example");
    form.set_field(ContactField::Phone, "(555) 987-6543");
    form.set_field(ContactField::Message, "Quote for 40 loads a month");
    form.set_sms_consent(true);
    assert_eq!(form.submit().await, Ok(ContactFormState::Success));

    let mut console = AdminConsole::new(backend.clone());
    console
        .select_tab(AdminTab::Contacts)
        .await
        .expect("contacts load");
    assert_eq!(console.stats().contact_count, 1);
    let contact = &console.contacts()[0];
    assert_eq!(contact.phone.as_deref(), Some("5559876543"));
    assert!(contact.sms_consent);
    assert!(contact.created_at.is_some());
}

#[tokio::test]
async fn console_patches_status_and_refetches() {
    let (state, backend) = spawn_stub().await;
    let backend = Arc::new(backend);
    submit_application(backend.clone())
        .await
        .expect("seed application");

    let mut console = AdminConsole::new(backend.clone());
    console.reload().await.expect("applications load");
    let id = console.applications()[0].id;

    console
        .update_status(id, ApplicationStatus::Interview)
        .await
        .expect("patch accepted");
    assert_eq!(console.applications()[0].status, ApplicationStatus::Interview);
    assert_eq!(console.stats().interview_count, 1);

    console
        .set_status_filter(StatusFilter::Only(ApplicationStatus::Pending))
        .await
        .expect("applications load");
    assert!(console.applications().is_empty());
    assert_eq!(console.stats().total_applications, 1);

    state.lock().expect("stub state").reject_status_updates = true;
    console
        .set_status_filter(StatusFilter::All)
        .await
        .expect("applications load");
    assert!(console
        .update_status(id, ApplicationStatus::Hired)
        .await
        .is_err());
    assert_eq!(console.applications()[0].status, ApplicationStatus::Interview);
    assert!(console.alert().is_some());
    assert_eq!(state.lock().expect("stub state").status_patches, 2);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("address");
    drop(listener);

    let base_url = ApiConfig::parse_base_url(&format!("http://{address}")).expect("url");
    let backend = HttpBackend::new(&ApiConfig::new(base_url)).expect("client builds");

    assert!(matches!(
        backend.health().await,
        Err(BackendError::Transport(_))
    ));
}

#[tokio::test]
async fn health_reports_service_name() {
    let (_, backend) = spawn_stub().await;
    let health = backend.health().await.expect("health decodes");
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service.as_deref(), Some("careers-api"));
}

use std::sync::Arc;

use clap::Args;
use fleet_portal::admin::{AdminConsole, AdminTab, StatusFilter};
use fleet_portal::api::{ApplicationId, ApplicationStatus, InMemoryBackend, PortalBackend};
use fleet_portal::error::AppError;
use fleet_portal::forms::{ApplicationField, ContactField, ContactForm, FormWizard, WizardError};

use crate::render;

#[derive(Args, Debug, Default)]
pub(crate) struct ApplyArgs {
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Any format; only the digits are submitted
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) country_of_birth: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) date_of_birth: Option<String>,
    #[arg(long)]
    pub(crate) address: Option<String>,
    #[arg(long)]
    pub(crate) city: Option<String>,
    #[arg(long)]
    pub(crate) state: Option<String>,
    #[arg(long)]
    pub(crate) zip_code: Option<String>,
    /// Experience bracket code: 0, 1, 3, 5 or 10
    #[arg(long)]
    pub(crate) years_experience: Option<String>,
    /// CDL class: A, B or C
    #[arg(long)]
    pub(crate) cdl_class: Option<String>,
    /// CDL expiration date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) cdl_expiration: Option<String>,
    #[arg(long)]
    pub(crate) previous_jobs: Option<String>,
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Accept the background-check and contact consent
    #[arg(long)]
    pub(crate) consent: bool,
}

impl ApplyArgs {
    fn personal_fields(&self) -> [(ApplicationField, &Option<String>); 10] {
        [
            (ApplicationField::FirstName, &self.first_name),
            (ApplicationField::LastName, &self.last_name),
            (ApplicationField::Email, &self.email),
            (ApplicationField::Phone, &self.phone),
            (ApplicationField::CountryOfBirth, &self.country_of_birth),
            (ApplicationField::DateOfBirth, &self.date_of_birth),
            (ApplicationField::Address, &self.address),
            (ApplicationField::City, &self.city),
            (ApplicationField::State, &self.state),
            (ApplicationField::ZipCode, &self.zip_code),
        ]
    }

    fn experience_fields(&self) -> [(ApplicationField, &Option<String>); 4] {
        [
            (ApplicationField::YearsExperience, &self.years_experience),
            (ApplicationField::CdlClass, &self.cdl_class),
            (ApplicationField::CdlExpiration, &self.cdl_expiration),
            (ApplicationField::PreviousJobs, &self.previous_jobs),
        ]
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ContactArgs {
    #[arg(long)]
    pub(crate) first_name: Option<String>,
    #[arg(long)]
    pub(crate) last_name: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) company_name: Option<String>,
    #[arg(long)]
    pub(crate) position: Option<String>,
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Opt in to SMS updates
    #[arg(long)]
    pub(crate) sms_consent: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ListApplicationsArgs {
    /// pending, reviewed, interview, hired, rejected or all
    #[arg(long, default_value = "all")]
    pub(crate) status: StatusFilter,
    /// Print the records as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SetStatusArgs {
    pub(crate) id: u64,
    /// pending, reviewed, interview, hired or rejected
    pub(crate) status: ApplicationStatus,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    pub(crate) id: u64,
    /// Print the record as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_apply<B>(backend: Arc<B>, args: ApplyArgs) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    let mut wizard = FormWizard::new(backend);

    for (field, value) in args.personal_fields() {
        if let Some(value) = value {
            wizard.set_field(field, value)?;
        }
    }
    if let Err(err) = wizard.advance() {
        println!("Step 1 of 3: personal information");
        render::field_errors(wizard.errors());
        return Err(err.into());
    }

    for (field, value) in args.experience_fields() {
        if let Some(value) = value {
            wizard.set_field(field, value)?;
        }
    }
    wizard.advance()?;

    if let Some(message) = &args.message {
        wizard.set_field(ApplicationField::Message, message)?;
    }
    if let Some(review) = wizard.review() {
        render::review(review);
    }

    wizard.set_consent(args.consent)?;
    submit_wizard(&mut wizard).await
}

async fn submit_wizard<B>(wizard: &mut FormWizard<B>) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    match wizard.submit().await {
        Ok(_) => {
            println!("\nApplication Submitted!");
            println!(
                "We've received your application and a member of our team will review it shortly."
            );
            Ok(())
        }
        Err(err) => {
            if let Some(notice) = wizard.notice() {
                println!("\n{notice}");
            }
            Err(err.into())
        }
    }
}

pub(crate) async fn run_contact<B>(backend: Arc<B>, args: ContactArgs) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    let mut form = ContactForm::new(backend);
    let fields = [
        (ContactField::FirstName, &args.first_name),
        (ContactField::LastName, &args.last_name),
        (ContactField::Email, &args.email),
        (ContactField::Phone, &args.phone),
        (ContactField::CompanyName, &args.company_name),
        (ContactField::Position, &args.position),
        (ContactField::Message, &args.message),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.set_field(field, value);
        }
    }
    form.set_sms_consent(args.sms_consent);

    match form.submit().await {
        Ok(_) => {
            println!("Message Sent!");
            println!("Thank you for reaching out. We'll get back to you as soon as possible.");
            Ok(())
        }
        Err(err) => {
            render::field_errors(form.errors());
            if let Some(alert) = form.alert() {
                println!("{alert}");
            }
            Err(err.into())
        }
    }
}

pub(crate) async fn run_admin_applications<B>(
    backend: Arc<B>,
    args: ListApplicationsArgs,
) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    let mut console = AdminConsole::new(backend);
    console.set_status_filter(args.status).await?;
    if args.json {
        return render::json(console.applications());
    }
    render::stats(console.stats());
    render::applications(console.applications(), console.filter());
    Ok(())
}

pub(crate) async fn run_admin_contacts<B>(backend: Arc<B>) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    let mut console = AdminConsole::new(backend);
    console.select_tab(AdminTab::Contacts).await?;
    render::contacts(console.contacts());
    Ok(())
}

pub(crate) async fn run_admin_set_status<B>(
    backend: Arc<B>,
    args: SetStatusArgs,
) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    let id = ApplicationId(args.id);
    let mut console = AdminConsole::new(backend);
    if let Err(err) = console.update_status(id, args.status).await {
        if let Some(alert) = console.alert() {
            println!("{alert}");
        }
        return Err(err.into());
    }

    println!("Application {id} moved to {}", args.status.title());
    render::stats(console.stats());
    Ok(())
}

pub(crate) async fn run_admin_show<B>(backend: Arc<B>, args: ShowArgs) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    let record = backend.fetch_application(ApplicationId(args.id)).await?;
    if args.json {
        return render::json(&record);
    }
    render::application_detail(&record);
    Ok(())
}

pub(crate) async fn run_health<B>(backend: Arc<B>) -> Result<(), AppError>
where
    B: PortalBackend + ?Sized,
{
    let health = backend.health().await?;
    render::health(&health);
    Ok(())
}

/// Offline walkthrough of every flow against the in-memory backend.
pub(crate) async fn run_demo() -> Result<(), AppError> {
    let backend = Arc::new(InMemoryBackend::default());
    println!("Fleet portal demo (in-memory backend)");

    println!("\nDriver application");
    let mut wizard = FormWizard::new(backend.clone());
    wizard.set_field(ApplicationField::FirstName, "Dana")?;
    wizard.set_field(ApplicationField::LastName, "Whitfield")?;
    wizard.set_field(ApplicationField::Email, "dana")?;
    wizard.set_field(ApplicationField::Phone, "555123")?;
    if wizard.advance().is_err() {
        println!("- Step 1 blocked:");
        render::field_errors(wizard.errors());
    }
    wizard.set_field(ApplicationField::Email, "dana.whitfield@example.com")?;
    wizard.set_field(ApplicationField::Phone, "5551234567")?;
    wizard.set_field(ApplicationField::City, "Amarillo")?;
    wizard.set_field(ApplicationField::State, "TX")?;
    wizard.advance()?;
    wizard.set_field(ApplicationField::YearsExperience, "5")?;
    wizard.set_field(ApplicationField::CdlClass, "A")?;
    wizard.set_field(ApplicationField::PreviousJobs, "Regional reefer, 2018-2025")?;
    wizard.advance()?;
    if let Some(review) = wizard.review() {
        render::review(review);
    }

    if let Err(WizardError::ConsentRequired) = wizard.submit().await {
        println!("- Submit without consent: {}", wizard.notice().unwrap_or_default());
    }
    wizard.set_consent(true)?;
    submit_wizard(&mut wizard).await?;

    println!("\nContact form");
    run_contact(
        backend.clone(),
        ContactArgs {
            first_name: Some("Morgan".to_string()),
            email: Some("morgan@shipperco.example".to_string()),
            company_name: Some("ShipperCo".to_string()),
            message: Some("Looking for weekly reefer capacity out of Dallas".to_string()),
            sms_consent: true,
            ..ContactArgs::default()
        },
    )
    .await?;

    println!("\nAdmin console");
    let mut console = AdminConsole::new(backend.clone());
    console.reload().await?;
    render::stats(console.stats());
    render::applications(console.applications(), console.filter());

    if let Some(id) = console.applications().first().map(|record| record.id) {
        console
            .update_status(id, ApplicationStatus::Interview)
            .await?;
        println!("\nApplication {id} moved to Interview");
        console
            .set_status_filter(StatusFilter::Only(ApplicationStatus::Interview))
            .await?;
        render::stats(console.stats());
        render::applications(console.applications(), console.filter());
    }

    console.select_tab(AdminTab::Contacts).await?;
    render::contacts(console.contacts());
    Ok(())
}

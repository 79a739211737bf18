use std::sync::Arc;

use crate::commands::{
    run_admin_applications, run_admin_contacts, run_admin_set_status, run_admin_show, run_apply,
    run_contact, run_demo, run_health, ApplyArgs, ContactArgs, ListApplicationsArgs,
    SetStatusArgs, ShowArgs,
};
use clap::{Parser, Subcommand};
use fleet_portal::api::HttpBackend;
use fleet_portal::config::{ApiConfig, AppConfig};
use fleet_portal::error::AppError;
use fleet_portal::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "fleet-portal",
    about = "Submit job applications and contact messages, and manage them from the admin console",
    version
)]
struct Cli {
    /// Override PORTAL_API_URL for this invocation
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk the three-step driver application and submit it
    Apply(ApplyArgs),
    /// Send a message through the contact form
    Contact(ContactArgs),
    /// Admin console: listings and status updates
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Check that the backend is reachable
    Health,
    /// Run the wizard, contact form and console against an in-memory backend
    Demo,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// List applications, optionally filtered by status
    Applications(ListApplicationsArgs),
    /// List contact messages
    Contacts,
    /// Move one application to a new status
    SetStatus(SetStatusArgs),
    /// Show every field of one application
    Show(ShowArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(raw) = cli.api_url.as_deref() {
        config.api.base_url = ApiConfig::parse_base_url(raw)?;
    }

    info!(
        environment = ?config.environment,
        api = %config.api.base_url,
        "fleet portal cli starting"
    );
    let backend = Arc::new(HttpBackend::new(&config.api)?);

    match cli.command {
        Command::Apply(args) => run_apply(backend, args).await,
        Command::Contact(args) => run_contact(backend, args).await,
        Command::Admin { command } => match command {
            AdminCommand::Applications(args) => run_admin_applications(backend, args).await,
            AdminCommand::Contacts => run_admin_contacts(backend).await,
            AdminCommand::SetStatus(args) => run_admin_set_status(backend, args).await,
            AdminCommand::Show(args) => run_admin_show(backend, args).await,
        },
        Command::Health => run_health(backend).await,
        Command::Demo => run_demo().await,
    }
}

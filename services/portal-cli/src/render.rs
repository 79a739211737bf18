use std::fmt::Display;

use fleet_portal::admin::{format_date, format_experience, DashboardStats, StatusFilter};
use fleet_portal::api::{ApplicationRecord, ContactRecord, HealthStatus};
use fleet_portal::error::AppError;
use fleet_portal::forms::{format_phone, FieldErrors, ReviewSummary};
use serde::Serialize;

const MISSING: &str = "N/A";

pub(crate) fn field_errors<F>(errors: &FieldErrors<F>)
where
    F: Ord + Copy + Display,
{
    for (field, message) in errors.iter() {
        println!("  - {field}: {message}");
    }
}

pub(crate) fn review(summary: &ReviewSummary) {
    println!("Review your application");
    let mut section = "";
    for entry in summary.entries() {
        if entry.section != section {
            section = entry.section;
            println!("{section}");
        }
        println!("  {}: {}", entry.label, entry.value);
    }
}

pub(crate) fn stats(stats: DashboardStats) {
    println!(
        "Total applications: {} | Pending: {} | Interviews: {} | Contact messages: {}",
        stats.total_applications, stats.pending_count, stats.interview_count, stats.contact_count
    );
}

pub(crate) fn applications(records: &[ApplicationRecord], filter: StatusFilter) {
    if records.is_empty() {
        println!("No applications found (filter: {filter})");
        return;
    }

    println!(
        "{:<6} {:<24} {:<32} {:<16} {:<10} {:<5} {:<10} {}",
        "ID", "Applicant", "Email", "Phone", "Experience", "CDL", "Status", "Date"
    );
    for record in records {
        println!(
            "{:<6} {:<24} {:<32} {:<16} {:<10} {:<5} {:<10} {}",
            record.id.to_string(),
            record.full_name(),
            record.email,
            format_phone(&record.phone),
            format_experience(record.years_experience),
            record.cdl_class.as_deref().unwrap_or(MISSING),
            record.status.title(),
            format_date(record.created_at),
        );
    }
}

pub(crate) fn application_detail(record: &ApplicationRecord) {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());

    println!("Application {} ({})", record.id, record.status.title());
    println!("  Name: {}", record.full_name());
    println!("  Email: {}", record.email);
    println!("  Phone: {}", format_phone(&record.phone));
    println!("  Country of birth: {}", optional(&record.country_of_birth));
    println!("  Date of birth: {}", optional(&record.date_of_birth));
    println!("  Address: {}", optional(&record.address));
    println!(
        "  City / State / ZIP: {} {} {}",
        optional(&record.city),
        optional(&record.state),
        optional(&record.zip_code)
    );
    println!(
        "  Experience: {}",
        format_experience(record.years_experience)
    );
    println!("  CDL class: {}", optional(&record.cdl_class));
    println!("  CDL expiration: {}", optional(&record.cdl_expiration));
    println!("  Previous jobs: {}", optional(&record.previous_jobs));
    println!("  Message: {}", optional(&record.message));
    println!("  Submitted: {}", format_date(record.created_at));
    if record.updated_at.is_some() {
        println!("  Updated: {}", format_date(record.updated_at));
    }
}

pub(crate) fn contacts(records: &[ContactRecord]) {
    if records.is_empty() {
        println!("No contact messages yet");
        return;
    }

    for record in records {
        let company = record.company_name.as_deref().unwrap_or(MISSING);
        let sms = if record.sms_consent { "yes" } else { "no" };
        println!(
            "#{} {} <{}> | {} | SMS: {} | {}",
            record.id,
            record.full_name(),
            record.email,
            company,
            sms,
            format_date(record.created_at)
        );
        if let Some(phone) = record.phone.as_deref().filter(|phone| !phone.is_empty()) {
            println!("  Phone: {}", format_phone(phone));
        }
        if let Some(position) = record.position.as_deref().filter(|value| !value.is_empty()) {
            println!("  Position: {position}");
        }
        println!("  {}", record.message);
    }
}

pub(crate) fn health(status: &HealthStatus) {
    match status.service.as_deref() {
        Some(service) => println!("Backend {service}: {}", status.status),
        None => println!("Backend: {}", status.status),
    }
}

pub(crate) fn json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

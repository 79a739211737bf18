pub mod admin;
pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod telemetry;

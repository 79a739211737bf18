//! Admin dashboard: application and contact listings plus status updates.

pub mod console;
pub mod display;

pub use console::{AdminConsole, AdminError, AdminTab, DashboardStats, StatusFilter};
pub use display::{format_date, format_experience};

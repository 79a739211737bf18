mod cli;
mod commands;
mod render;

use fleet_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

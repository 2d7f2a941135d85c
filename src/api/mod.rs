//! Command-line and HTTP surfaces over the screening workflow.

mod cli;
mod console;
mod infra;
mod routes;
mod server;

use crate::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

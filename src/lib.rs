mod cli;
pub mod config;
mod demo;
pub mod error;
mod infra;
mod routes;
pub mod scoring;
mod server;
pub mod telemetry;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

mod cli;
mod infra;
mod locate;
mod presentation;
mod routes;
mod server;

use solar_siting::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

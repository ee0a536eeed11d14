mod cli;
mod infra;
mod reports;
mod routes;
mod server;

use custody_compare::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

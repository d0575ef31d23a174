mod cli;
mod infra;
mod routes;
mod score;
mod server;

use placement_match::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

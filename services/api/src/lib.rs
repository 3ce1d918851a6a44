mod cli;
mod infra;
mod routes;
mod scorecard;
mod server;

use leadership_index::error::AppError;

pub use routes::SCORE_PATH;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

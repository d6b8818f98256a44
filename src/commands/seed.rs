//! Seed command - idempotent reference-data population.

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, SeedLoader};

/// Execute the seed command.
///
/// Connects with migrations applied first (the schema must exist), then
/// runs every seed step; rows already present are skipped.
pub async fn execute(_args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let loader = SeedLoader::new(db.get_connection());
    let report = loader.seed_all().await?;

    println!("{report}");
    Ok(())
}

//! Report command - prints facade views as JSON.

use chrono::Utc;

use crate::cli::args::{ReportArgs, ReportView};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{QueryFacade, ServiceContainer, Services};

/// Execute the report command
pub async fn execute(args: ReportArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection(), config);
    let facade = QueryFacade::new(
        services.network(),
        services.fleet(),
        services.assignments(),
        services.trips(),
    );

    let json = match args.view {
        ReportView::Itinerary { line_id } => {
            let summary = facade.line_itinerary_summary(&line_id).await?;
            serde_json::to_string_pretty(&summary)
        }
        ReportView::Assignments { at } => {
            let report = facade
                .active_assignments_report(at.unwrap_or_else(Utc::now))
                .await?;
            serde_json::to_string_pretty(&report)
        }
        ReportView::Trip { trip_id } => {
            let progress = facade.trip_progress(&trip_id).await?;
            serde_json::to_string_pretty(&progress)
        }
    }
    .map_err(|e| AppError::internal(format!("failed to serialize report: {e}")))?;

    println!("{json}");
    Ok(())
}

//! Shared test harness: an in-memory SQLite store with the full
//! migration set applied, optionally seeded.
#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use porto_transit::config::Config;
use porto_transit::infra::{Database, Persistence, SeedLoader};
use porto_transit::services::{QueryFacade, ServiceContainer, Services};

/// Config pointing at a fresh in-memory SQLite database.
///
/// A single pooled connection keeps the in-memory database alive and
/// shared across the test.
pub fn test_config() -> Config {
    let mut config = Config::for_database_url("sqlite::memory:");
    config.max_connections = 1;
    config
}

/// Connect to a fresh in-memory database with migrations applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect(&test_config())
        .await
        .expect("connect and migrate in-memory sqlite");
    db.get_connection()
}

/// A migrated database with the reference network seeded.
pub async fn seeded_db() -> DatabaseConnection {
    let db = setup_db().await;
    SeedLoader::new(db.clone())
        .seed_all()
        .await
        .expect("seed reference data");
    db
}

/// Unit of work over the given connection.
pub fn persistence(db: DatabaseConnection) -> Arc<Persistence> {
    Arc::new(Persistence::new(db))
}

/// Full service container over the given connection.
pub fn services(db: DatabaseConnection) -> Services {
    Services::from_connection(db, test_config())
}

/// Query facade over the given connection.
pub fn facade(db: DatabaseConnection) -> QueryFacade {
    let services = services(db);
    QueryFacade::new(
        services.network(),
        services.fleet(),
        services.assignments(),
        services.trips(),
    )
}

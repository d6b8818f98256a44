//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}
//!
//! Ordering mirrors the schema's foreign-key dependencies:
//! users → fleet (drivers, vehicles) → network (lines, stops) →
//! line detail (stop_times, line_schedules) → driver_assignments →
//! trips and trip_stops.

use sea_orm_migration::prelude::*;

mod m20251020_000001_create_users_tables;
mod m20251020_000002_create_fleet_tables;
mod m20251020_000003_create_network_tables;
mod m20251020_000004_create_line_detail_tables;
mod m20251020_000005_create_driver_assignments_table;
mod m20251020_000006_create_trips_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_users_tables::Migration),
            Box::new(m20251020_000002_create_fleet_tables::Migration),
            Box::new(m20251020_000003_create_network_tables::Migration),
            Box::new(m20251020_000004_create_line_detail_tables::Migration),
            Box::new(m20251020_000005_create_driver_assignments_table::Migration),
            Box::new(m20251020_000006_create_trips_tables::Migration),
        ]
    }
}

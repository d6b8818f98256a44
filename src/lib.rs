//! Porto Transit - a transit scheduling and assignment data service.
//!
//! A single-node relational data layer over the public-transit schema:
//! users, sessions, drivers, vehicles, lines, stops, stop_times,
//! schedules, driver assignments and trips.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations (migrate, seed, report)
//! - **config**: Application configuration and constants
//! - **domain**: Core entities, invariant validators, natural keys
//! - **infra**: Database, migrations, repositories, seed loader,
//!   unit of work
//! - **services**: Use cases (users, fleet, network, assignments,
//!   trips) and the read-only query facade
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Apply the schema
//! cargo run -- migrate up
//!
//! # Populate reference data (safe to re-run)
//! cargo run -- seed
//!
//! # Inspect a line
//! cargo run -- report itinerary LINE_B_500
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{
    DriverAssignment, Line, LineMode, LineSchedule, NewAssignment, NewTrip, Role, Stop, Trip, User,
};
pub use errors::{AppError, AppResult, OptionExt};
pub use infra::{Database, Persistence, SeedLoader, UnitOfWork};
pub use services::{QueryFacade, ServiceContainer, Services};

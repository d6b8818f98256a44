//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Porto Transit - transit scheduling and assignment data service
#[derive(Parser, Debug)]
#[command(name = "porto-transit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Seed reference data (idempotent)
    Seed(SeedArgs),

    /// Print read-only report views as JSON
    Report(ReportArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {}

/// Arguments for the report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub view: ReportView,
}

/// Report views
#[derive(Subcommand, Debug)]
pub enum ReportView {
    /// A line with its ordered itinerary
    Itinerary {
        /// Line id (e.g. LINE_B_500)
        line_id: String,
    },
    /// Active assignments per line
    Assignments {
        /// Point in time to evaluate (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// A trip with its tracked stop and projected arrival
    Trip {
        /// Trip id
        trip_id: String,
    },
}

//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `seed` - Idempotent reference-data seeding
//! - `report` - Read-only facade views

pub mod args;

pub use args::{Cli, Commands};

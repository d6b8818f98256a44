//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Typed repositories over the transit schema
//! - Unit of Work for transaction management
//! - Idempotent seed loading

pub mod db;
pub mod repositories;
pub mod seed;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    AssignmentRepository, AssignmentStore, DriverRepository, DriverStore, LineRepository,
    LineStore, SessionRepository, SessionStore, StopRepository, StopStore, TripRepository,
    TripStore, UserRepository, UserStore, VehicleRepository, VehicleStore,
};
pub use seed::{SeedLoader, SeedReport};
pub use unit_of_work::{Persistence, TransactionContext, TxAssignmentRepository, TxTripRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAssignmentRepository, MockDriverRepository, MockLineRepository, MockSessionRepository,
    MockStopRepository, MockTripRepository, MockUserRepository, MockVehicleRepository,
};

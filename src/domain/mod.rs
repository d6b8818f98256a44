//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! transit concepts independent of infrastructure concerns.
//!
//! All entity identifiers are opaque strings at this boundary: new rows
//! get UUID-shaped ids, seeded rows keep their natural keys verbatim.

pub mod assignment;
pub mod driver;
pub mod itinerary;
pub mod keys;
pub mod line;
pub mod schedule;
pub mod session;
pub mod stop;
pub mod trip;
pub mod user;
pub mod vehicle;

pub use assignment::{AssignmentState, DriverAssignment, NewAssignment};
pub use driver::{Driver, NewDriver};
pub use itinerary::{ItineraryStop, StopTime, ValidationMode};
pub use line::{Line, LineMode, NewLine};
pub use schedule::{LineSchedule, NewSchedule};
pub use session::{NewSession, UserSession};
pub use stop::{NewStop, Stop};
pub use trip::{NewTrip, Trip, TripStop};
pub use user::{NewUser, Role, User};
pub use vehicle::{NewVehicle, Vehicle};

/// Generate a fresh opaque identifier (UUID v4 rendered as a string).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

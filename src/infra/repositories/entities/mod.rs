//! SeaORM entity definitions
//!
//! These are database-specific models separate from the domain types.
//! Primary keys are opaque 36-character strings; seeded rows keep their
//! natural keys.

pub mod driver;
pub mod driver_assignment;
pub mod line;
pub mod line_schedule;
pub mod stop;
pub mod stop_time;
pub mod trip;
pub mod trip_stop;
pub mod user;
pub mod user_session;
pub mod vehicle;

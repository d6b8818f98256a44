//! Passenger trips and their tracked stop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A passenger's planned journey. Every reference is optional: the user
/// may be deleted (SET NULL), and multi-line journeys carry no single
/// line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: String,
    pub user_id: Option<String>,
    pub line_id: Option<String>,
    pub origin_stop_id: Option<String>,
    pub dest_stop_id: Option<String>,
    pub planned_start: DateTime<Utc>,
    pub planned_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Trip creation data
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub user_id: Option<String>,
    pub line_id: Option<String>,
    pub origin_stop_id: Option<String>,
    pub dest_stop_id: Option<String>,
    pub planned_start: DateTime<Utc>,
    pub planned_end: Option<DateTime<Utc>>,
}

/// The single tracked stop of a trip, with estimated and actual arrival.
///
/// The primary key is the trip id alone: only one stop per trip is
/// tracked, a modeling constraint inherited from the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripStop {
    pub trip_id: String,
    pub stop_id: String,
    pub eta: Option<DateTime<Utc>>,
    pub ata: Option<DateTime<Utc>>,
}

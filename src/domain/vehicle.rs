//! Vehicle domain entity.

use serde::{Deserialize, Serialize};

/// A fleet vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    pub plate: String,
    pub model: Option<String>,
    /// Seat/standing capacity; must be positive when present
    pub capacity: Option<i32>,
    pub active: bool,
}

/// Vehicle creation data
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub plate: String,
    pub model: Option<String>,
    pub capacity: Option<i32>,
}

//! Stop domain entity.

use serde::{Deserialize, Serialize};

/// A physical stop. Coordinates may be absent for stops that were
/// imported without geodata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: String,
    pub code: String,
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Stop creation data
#[derive(Debug, Clone)]
pub struct NewStop {
    pub code: String,
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

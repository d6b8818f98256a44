//! Driver domain entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A licensed driver. Deleting a driver cascades to their assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: String,
    pub full_name: String,
    pub license_no: String,
    pub hire_date: NaiveDate,
}

/// Driver creation data
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub full_name: String,
    pub license_no: String,
    pub hire_date: NaiveDate,
}

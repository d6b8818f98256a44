//! Weekly line schedules.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// One service window: a line's operating hours and headway for a
/// single day of the week. One row per (line, dow) is the intended
/// cardinality; the repository enforces it since the schema does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSchedule {
    pub schedule_id: String,
    pub line_id: String,
    /// Day of week, 0 = Monday .. 6 = Sunday
    pub dow: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Minutes between consecutive departures
    pub headway_minutes: i32,
}

/// Schedule creation data
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub line_id: String,
    pub dow: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub headway_minutes: i32,
}

impl NewSchedule {
    /// Validate field-level invariants: dow in range, positive headway.
    pub fn validate(&self) -> AppResult<()> {
        if self.dow > 6 {
            return Err(AppError::validation(format!(
                "dow {} out of range 0..=6",
                self.dow
            )));
        }
        if self.headway_minutes <= 0 {
            return Err(AppError::validation(format!(
                "headway_minutes must be positive, got {}",
                self.headway_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(dow: u8, headway: i32) -> NewSchedule {
        NewSchedule {
            line_id: "LINE_M_A".to_string(),
            dow,
            start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            headway_minutes: headway,
        }
    }

    #[test]
    fn rejects_out_of_range_dow() {
        assert!(schedule(7, 6).validate().is_err());
        assert!(schedule(6, 6).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_headway() {
        assert!(schedule(0, 0).validate().is_err());
        assert!(schedule(0, -5).validate().is_err());
    }
}

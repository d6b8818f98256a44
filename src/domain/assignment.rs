//! Driver assignments: a driver operating a vehicle on a line over a
//! time window.
//!
//! State machine: Open (end_ts null) -> Closed (end_ts set). Closed is
//! terminal; there is no transition back to Open.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Lifecycle state of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentState {
    Open,
    Closed,
}

/// A driver/vehicle/line assignment over `[start_ts, end_ts)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverAssignment {
    pub assignment_id: String,
    pub driver_id: String,
    pub vehicle_id: String,
    pub line_id: String,
    pub start_ts: DateTime<Utc>,
    pub end_ts: Option<DateTime<Utc>>,
}

impl DriverAssignment {
    pub fn state(&self) -> AssignmentState {
        if self.end_ts.is_some() {
            AssignmentState::Closed
        } else {
            AssignmentState::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_ts.is_none()
    }

    /// Whether the assignment is in effect at `at`:
    /// started, and either still open or ending after `at`.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start_ts <= at && self.end_ts.map_or(true, |end| end > at)
    }

    /// Validate the Open -> Closed transition.
    ///
    /// Fails with `InvalidState` when the assignment is already closed
    /// or when `end_ts` does not lie after `start_ts`.
    pub fn validate_close(&self, end_ts: DateTime<Utc>) -> AppResult<()> {
        if self.end_ts.is_some() {
            return Err(AppError::invalid_state(format!(
                "assignment {} is already closed",
                self.assignment_id
            )));
        }
        if end_ts <= self.start_ts {
            return Err(AppError::invalid_state(format!(
                "end_ts {} must be after start_ts {}",
                end_ts, self.start_ts
            )));
        }
        Ok(())
    }
}

/// Assignment creation data; created assignments are always Open.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub driver_id: String,
    pub vehicle_id: String,
    pub line_id: String,
    pub start_ts: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn open_assignment() -> DriverAssignment {
        DriverAssignment {
            assignment_id: "ASG_LINE_M_A_02".to_string(),
            driver_id: "DRV_LINE_M_A_02".to_string(),
            vehicle_id: "VEH_LINE_M_A_02".to_string(),
            line_id: "LINE_M_A".to_string(),
            start_ts: Utc.with_ymd_and_hms(2026, 8, 10, 6, 0, 0).unwrap(),
            end_ts: None,
        }
    }

    #[test]
    fn created_assignments_are_open() {
        let a = open_assignment();
        assert_eq!(a.state(), AssignmentState::Open);
        assert!(a.is_open());
    }

    #[test]
    fn close_requires_end_after_start() {
        let a = open_assignment();
        let before = a.start_ts - chrono::Duration::minutes(5);
        assert!(matches!(
            a.validate_close(before),
            Err(AppError::InvalidState(_))
        ));
        assert!(matches!(
            a.validate_close(a.start_ts),
            Err(AppError::InvalidState(_))
        ));
        assert!(a.validate_close(a.start_ts + chrono::Duration::hours(8)).is_ok());
    }

    #[test]
    fn closed_is_terminal() {
        let mut a = open_assignment();
        a.end_ts = Some(a.start_ts + chrono::Duration::hours(8));
        assert_eq!(a.state(), AssignmentState::Closed);
        let later = a.start_ts + chrono::Duration::hours(9);
        assert!(matches!(
            a.validate_close(later),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn activity_window_is_half_open() {
        let mut a = open_assignment();
        assert!(a.is_active_at(a.start_ts));
        assert!(!a.is_active_at(a.start_ts - chrono::Duration::seconds(1)));

        let end = a.start_ts + chrono::Duration::hours(8);
        a.end_ts = Some(end);
        assert!(a.is_active_at(end - chrono::Duration::seconds(1)));
        assert!(!a.is_active_at(end));
    }
}

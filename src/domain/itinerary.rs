//! Itineraries: the ordered stop sequence of a line.
//!
//! A stop_time places one stop on one line at a scheduled offset from
//! the line start. The schema only enforces `(line, stop)` uniqueness;
//! offset monotonicity is validated here, advisory by default.

use serde::{Deserialize, Serialize};

use super::stop::Stop;
use crate::errors::{AppError, AppResult};

/// A (line, stop) pair with its scheduled offset in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopTime {
    pub stop_time_id: String,
    pub line_id: String,
    pub stop_id: String,
    pub scheduled_seconds_from_start: i32,
}

/// One entry of a resolved itinerary: the stop plus its offset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryStop {
    pub stop: Stop,
    pub offset_seconds: i32,
}

/// How offset-monotonicity violations are handled on write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Log a warning and accept the write (the schema permits it)
    #[default]
    Advisory,
    /// Reject the write with a validation error
    Strict,
}

/// Whether a sequence of offsets is strictly increasing.
///
/// An itinerary is well-formed when its offsets strictly increase in
/// visiting order; ordering by offset makes duplicates the only way to
/// break this.
pub fn offsets_strictly_increasing(offsets: &[i32]) -> bool {
    offsets.windows(2).all(|w| w[0] < w[1])
}

/// Check a new offset against a line's existing offsets.
///
/// Returns `Validation` in strict mode when the offset collides with a
/// neighbor; in advisory mode the collision is only logged.
pub fn check_offset_monotonic(
    existing_sorted: &[i32],
    new_offset: i32,
    mode: ValidationMode,
) -> AppResult<()> {
    if !existing_sorted.contains(&new_offset) {
        return Ok(());
    }
    match mode {
        ValidationMode::Strict => Err(AppError::validation(format!(
            "offset {new_offset}s collides with an existing stop_time; itinerary would not be strictly increasing"
        ))),
        ValidationMode::Advisory => {
            tracing::warn!(
                offset = new_offset,
                "stop_time offset collides with an existing entry; itinerary is no longer strictly monotonic"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_strictly_increasing_offsets() {
        assert!(offsets_strictly_increasing(&[0, 420, 840, 1260, 1680]));
        assert!(offsets_strictly_increasing(&[]));
        assert!(offsets_strictly_increasing(&[300]));
        assert!(!offsets_strictly_increasing(&[0, 420, 420]));
        assert!(!offsets_strictly_increasing(&[0, 600, 300]));
    }

    #[test]
    fn strict_mode_rejects_colliding_offset() {
        let existing = [0, 420, 840];
        let err = check_offset_monotonic(&existing, 420, ValidationMode::Strict).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn advisory_mode_accepts_colliding_offset() {
        let existing = [0, 420, 840];
        assert!(check_offset_monotonic(&existing, 420, ValidationMode::Advisory).is_ok());
        assert!(check_offset_monotonic(&existing, 630, ValidationMode::Strict).is_ok());
    }
}

//! Trip service - planning trips and projecting arrival times.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Utc};
use std::sync::Arc;

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::domain::{NewTrip, Trip, TripStop};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trip service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TripService: Send + Sync {
    /// Create a trip and, when a tracked stop is given (or a
    /// destination stop is set), its tracked-stop row, atomically.
    async fn plan_trip(&self, data: NewTrip, tracked_stop: Option<String>) -> AppResult<Trip>;

    /// Get trip by ID
    async fn get_trip(&self, id: &str) -> AppResult<Trip>;

    /// The trip's tracked stop, if recorded
    async fn get_trip_stop(&self, trip_id: &str) -> AppResult<Option<TripStop>>;

    /// A user's trips, newest first, capped at `limit` (default when None)
    async fn trip_history(&self, user_id: &str, limit: Option<u64>) -> AppResult<Vec<Trip>>;

    /// Project the arrival time at the trip's tracked stop and record
    /// it as the stop's ETA.
    ///
    /// `NotFound` when the trip, its line, its tracked stop, or the
    /// tracked stop's position on the line's itinerary is absent.
    async fn project_trip_eta(&self, trip_id: &str) -> AppResult<DateTime<Utc>>;

    /// Record the actual arrival at the tracked stop
    async fn record_arrival(&self, trip_id: &str, ata: DateTime<Utc>) -> AppResult<TripStop>;
}

/// Concrete implementation of TripService using Unit of Work.
pub struct TripManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TripManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TripService for TripManager<U> {
    async fn plan_trip(&self, data: NewTrip, tracked_stop: Option<String>) -> AppResult<Trip> {
        let tracked = tracked_stop.or_else(|| data.dest_stop_id.clone());

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.trips();

                    if let Some(user_id) = &data.user_id {
                        repo.ensure_user(user_id).await?;
                    }
                    if let Some(line_id) = &data.line_id {
                        repo.ensure_line(line_id).await?;
                    }
                    for stop_id in [&data.origin_stop_id, &data.dest_stop_id]
                        .into_iter()
                        .flatten()
                    {
                        repo.ensure_stop(stop_id).await?;
                    }

                    let trip = repo.insert(data).await?;
                    if let Some(stop_id) = tracked {
                        repo.ensure_stop(&stop_id).await?;
                        repo.insert_trip_stop(&trip.trip_id, &stop_id).await?;
                    }
                    Ok(trip)
                })
            })
            .await
    }

    async fn get_trip(&self, id: &str) -> AppResult<Trip> {
        self.uow.trips().find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn get_trip_stop(&self, trip_id: &str) -> AppResult<Option<TripStop>> {
        self.uow.trips().trip_stop(trip_id).await
    }

    async fn trip_history(&self, user_id: &str, limit: Option<u64>) -> AppResult<Vec<Trip>> {
        self.uow
            .trips()
            .history_for_user(user_id, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await
    }

    async fn project_trip_eta(&self, trip_id: &str) -> AppResult<DateTime<Utc>> {
        let trip = self
            .uow
            .trips()
            .find_by_id(trip_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let line_id = trip.line_id.as_deref().ok_or(AppError::NotFound)?;
        let tracked = self
            .uow
            .trips()
            .trip_stop(trip_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let itinerary = self.uow.lines().itinerary(line_id).await?;

        let target_offset = itinerary
            .iter()
            .find(|entry| entry.stop.stop_id == tracked.stop_id)
            .map(|entry| entry.offset_seconds)
            .ok_or(AppError::NotFound)?;

        let origin_offset = trip
            .origin_stop_id
            .as_deref()
            .and_then(|origin| {
                itinerary
                    .iter()
                    .find(|entry| entry.stop.stop_id == origin)
                    .map(|entry| entry.offset_seconds)
            })
            .unwrap_or(0);

        if target_offset < origin_offset {
            return Err(AppError::validation(format!(
                "tracked stop {} precedes the trip origin on line {}",
                tracked.stop_id, line_id
            )));
        }

        let headway = match self
            .uow
            .lines()
            .schedule_for_day(line_id, dow_of(trip.planned_start))
            .await
        {
            Ok(schedule) => Some(schedule.headway_minutes),
            Err(AppError::NotFound) => None,
            Err(e) => return Err(e),
        };

        let eta = project_eta(trip.planned_start, headway, origin_offset, target_offset);
        self.uow.trips().set_eta(trip_id, eta).await?;
        Ok(eta)
    }

    async fn record_arrival(&self, trip_id: &str, ata: DateTime<Utc>) -> AppResult<TripStop> {
        self.uow.trips().set_ata(trip_id, ata).await
    }
}

/// Day of week of a timestamp, 0 = Monday .. 6 = Sunday
pub fn dow_of(ts: DateTime<Utc>) -> u8 {
    ts.weekday().num_days_from_monday() as u8
}

/// ETA = planned start + expected wait + travel time.
///
/// Expected wait is half the headway of the day's schedule; with no
/// schedule row there is no wait term. Travel time is the offset delta
/// between the tracked stop and the origin along the itinerary.
pub fn project_eta(
    planned_start: DateTime<Utc>,
    headway_minutes: Option<i32>,
    origin_offset: i32,
    target_offset: i32,
) -> DateTime<Utc> {
    let wait_seconds = headway_minutes.map_or(0, |headway| headway * 60 / 2);
    planned_start + Duration::seconds(i64::from(wait_seconds + target_offset - origin_offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dow_is_monday_based() {
        // 2026-08-10 is a Monday
        let monday = Utc.with_ymd_and_hms(2026, 8, 10, 10, 0, 0).unwrap();
        assert_eq!(dow_of(monday), 0);
        assert_eq!(dow_of(monday + Duration::days(6)), 6);
    }

    #[test]
    fn eta_adds_half_headway_and_offset_delta() {
        let start = Utc.with_ymd_and_hms(2026, 8, 10, 10, 0, 0).unwrap();
        // 12 minute headway -> 360 s wait; 840 - 0 = 840 s travel
        let eta = project_eta(start, Some(12), 0, 840);
        assert_eq!(eta, start + Duration::seconds(360 + 840));
    }

    #[test]
    fn eta_without_schedule_has_no_wait_term() {
        let start = Utc.with_ymd_and_hms(2026, 8, 10, 10, 0, 0).unwrap();
        let eta = project_eta(start, None, 420, 1680);
        assert_eq!(eta, start + Duration::seconds(1260));
    }
}

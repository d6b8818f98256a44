//! Network service - lines, stops, itineraries and schedules.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::itinerary::{ItineraryStop, StopTime, ValidationMode};
use crate::domain::{Line, LineSchedule, NewLine, NewSchedule, NewStop, Stop};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Network service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NetworkService: Send + Sync {
    async fn add_line(&self, data: NewLine) -> AppResult<Line>;

    async fn get_line(&self, id: &str) -> AppResult<Line>;

    async fn get_line_by_code(&self, code: &str) -> AppResult<Line>;

    async fn list_active_lines(&self) -> AppResult<Vec<Line>>;

    async fn add_stop(&self, data: NewStop) -> AppResult<Stop>;

    async fn get_stop(&self, id: &str) -> AppResult<Stop>;

    async fn list_stops(&self) -> AppResult<Vec<Stop>>;

    /// The line's ordered itinerary; `NotFound` when it has no
    /// stop_times.
    async fn get_itinerary(&self, line_id: &str) -> AppResult<Vec<ItineraryStop>>;

    /// Place a stop on a line; monotonicity handled per `mode`
    async fn add_stop_time(
        &self,
        line_id: &str,
        stop_id: &str,
        offset_seconds: i32,
        mode: ValidationMode,
    ) -> AppResult<StopTime>;

    /// The schedule for one day of the week; `NotFound` when absent
    async fn get_schedule_for_day(&self, line_id: &str, dow: u8) -> AppResult<LineSchedule>;

    /// Insert or (with `replace`) update the schedule for (line, dow)
    async fn set_schedule(&self, data: NewSchedule, replace: bool) -> AppResult<LineSchedule>;
}

/// Concrete implementation of NetworkService using Unit of Work.
pub struct NetworkManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NetworkManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NetworkService for NetworkManager<U> {
    async fn add_line(&self, data: NewLine) -> AppResult<Line> {
        self.uow.lines().create(data).await
    }

    async fn get_line(&self, id: &str) -> AppResult<Line> {
        self.uow.lines().find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn get_line_by_code(&self, code: &str) -> AppResult<Line> {
        self.uow.lines().find_by_code(code).await?.ok_or(AppError::NotFound)
    }

    async fn list_active_lines(&self) -> AppResult<Vec<Line>> {
        self.uow.lines().list_active().await
    }

    async fn add_stop(&self, data: NewStop) -> AppResult<Stop> {
        self.uow.stops().create(data).await
    }

    async fn get_stop(&self, id: &str) -> AppResult<Stop> {
        self.uow.stops().find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_stops(&self) -> AppResult<Vec<Stop>> {
        self.uow.stops().list().await
    }

    async fn get_itinerary(&self, line_id: &str) -> AppResult<Vec<ItineraryStop>> {
        self.uow.lines().itinerary(line_id).await
    }

    async fn add_stop_time(
        &self,
        line_id: &str,
        stop_id: &str,
        offset_seconds: i32,
        mode: ValidationMode,
    ) -> AppResult<StopTime> {
        self.uow
            .lines()
            .add_stop_time(line_id, stop_id, offset_seconds, mode)
            .await
    }

    async fn get_schedule_for_day(&self, line_id: &str, dow: u8) -> AppResult<LineSchedule> {
        self.uow.lines().schedule_for_day(line_id, dow).await
    }

    async fn set_schedule(&self, data: NewSchedule, replace: bool) -> AppResult<LineSchedule> {
        self.uow.lines().set_schedule(data, replace).await
    }
}

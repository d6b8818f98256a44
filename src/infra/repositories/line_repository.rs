//! Line repository implementation.
//!
//! Lines own their itinerary (stop_times) and weekly schedule, so the
//! queries and write-side invariants for both live here: ordered
//! itinerary assembly, offset-monotonicity validation, and the
//! one-schedule-per-(line, dow) rule the schema does not enforce.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::line::{self, ActiveModel, Entity as LineEntity};
use super::entities::line_schedule::{
    self, ActiveModel as ScheduleActiveModel, Entity as ScheduleEntity,
};
use super::entities::stop::Entity as StopEntity;
use super::entities::stop_time::{
    self, ActiveModel as StopTimeActiveModel, Entity as StopTimeEntity,
};
use crate::domain::itinerary::{check_offset_monotonic, ItineraryStop, StopTime, ValidationMode};
use crate::domain::{new_id, Line, LineSchedule, NewLine, NewSchedule};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Line repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LineRepository: Send + Sync {
    /// Find line by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Line>>;

    /// Find line by its unique code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Line>>;

    /// Create a new line; rejects duplicate codes
    async fn create(&self, data: NewLine) -> AppResult<Line>;

    /// Flip the active flag
    async fn set_active(&self, id: &str, active: bool) -> AppResult<Line>;

    /// List active lines ordered by (mode, code)
    async fn list_active(&self) -> AppResult<Vec<Line>>;

    /// List all lines
    async fn list(&self) -> AppResult<Vec<Line>>;

    /// The ordered itinerary of a line: its stops with offsets,
    /// ascending by offset. `NotFound` when the line has zero
    /// stop_times.
    async fn itinerary(&self, line_id: &str) -> AppResult<Vec<ItineraryStop>>;

    /// Place a stop on a line at the given offset.
    ///
    /// `Referential` when line or stop is missing, `Conflict` when the
    /// (line, stop) pair already exists; offset collisions are handled
    /// per `mode`.
    async fn add_stop_time(
        &self,
        line_id: &str,
        stop_id: &str,
        offset_seconds: i32,
        mode: ValidationMode,
    ) -> AppResult<StopTime>;

    /// The schedule for one day of the week; `NotFound` when absent.
    async fn schedule_for_day(&self, line_id: &str, dow: u8) -> AppResult<LineSchedule>;

    /// All schedules of a line ordered by dow
    async fn schedules(&self, line_id: &str) -> AppResult<Vec<LineSchedule>>;

    /// Insert a schedule for (line, dow). A second schedule for the
    /// same day is rejected with `Validation` unless `replace` is set,
    /// in which case the existing row is updated in place.
    async fn set_schedule(&self, data: NewSchedule, replace: bool) -> AppResult<LineSchedule>;
}

/// Concrete implementation of LineRepository
pub struct LineStore {
    db: DatabaseConnection,
}

impl LineStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LineRepository for LineStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Line>> {
        let result = LineEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Line::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Line>> {
        let result = LineEntity::find()
            .filter(line::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Line::from))
    }

    async fn create(&self, data: NewLine) -> AppResult<Line> {
        let existing = LineEntity::find()
            .filter(line::Column::Code.eq(data.code.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "line with code {} already exists",
                data.code
            )));
        }

        let active_model = ActiveModel {
            line_id: Set(new_id()),
            code: Set(data.code),
            name: Set(data.name),
            line_mode: Set(data.mode.as_str().to_string()),
            active: Set(true),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Line::from(model))
    }

    async fn set_active(&self, id: &str, active: bool) -> AppResult<Line> {
        let existing = LineEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: ActiveModel = existing.into();
        active_model.active = Set(active);

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(Line::from(model))
    }

    async fn list_active(&self) -> AppResult<Vec<Line>> {
        let models = LineEntity::find()
            .filter(line::Column::Active.eq(true))
            .order_by_asc(line::Column::LineMode)
            .order_by_asc(line::Column::Code)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Line::from).collect())
    }

    async fn list(&self) -> AppResult<Vec<Line>> {
        let models = LineEntity::find()
            .order_by_asc(line::Column::Code)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Line::from).collect())
    }

    async fn itinerary(&self, line_id: &str) -> AppResult<Vec<ItineraryStop>> {
        let rows = StopTimeEntity::find()
            .filter(stop_time::Column::LineId.eq(line_id))
            .find_also_related(StopEntity)
            .order_by_asc(stop_time::Column::ScheduledSecondsFromStart)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if rows.is_empty() {
            return Err(AppError::NotFound);
        }

        rows.into_iter()
            .map(|(st, stop)| {
                let stop = stop.ok_or_else(|| {
                    AppError::internal(format!("stop_time {} has no stop row", st.stop_time_id))
                })?;
                Ok(ItineraryStop {
                    stop: stop.into(),
                    offset_seconds: st.scheduled_seconds_from_start,
                })
            })
            .collect()
    }

    async fn add_stop_time(
        &self,
        line_id: &str,
        stop_id: &str,
        offset_seconds: i32,
        mode: ValidationMode,
    ) -> AppResult<StopTime> {
        if LineEntity::find_by_id(line_id).one(&self.db).await?.is_none() {
            return Err(AppError::referential(format!("line {line_id}")));
        }
        if StopEntity::find_by_id(stop_id).one(&self.db).await?.is_none() {
            return Err(AppError::referential(format!("stop {stop_id}")));
        }

        let duplicate = StopTimeEntity::find()
            .filter(stop_time::Column::LineId.eq(line_id))
            .filter(stop_time::Column::StopId.eq(stop_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        if duplicate.is_some() {
            return Err(AppError::conflict(format!(
                "stop {stop_id} is already on line {line_id}"
            )));
        }

        let existing_offsets: Vec<i32> = StopTimeEntity::find()
            .filter(stop_time::Column::LineId.eq(line_id))
            .order_by_asc(stop_time::Column::ScheduledSecondsFromStart)
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|st| st.scheduled_seconds_from_start)
            .collect();

        check_offset_monotonic(&existing_offsets, offset_seconds, mode)?;

        let active_model = StopTimeActiveModel {
            stop_time_id: Set(new_id()),
            line_id: Set(line_id.to_string()),
            stop_id: Set(stop_id.to_string()),
            scheduled_seconds_from_start: Set(offset_seconds),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(StopTime::from(model))
    }

    async fn schedule_for_day(&self, line_id: &str, dow: u8) -> AppResult<LineSchedule> {
        let result = ScheduleEntity::find()
            .filter(line_schedule::Column::LineId.eq(line_id))
            .filter(line_schedule::Column::Dow.eq(dow as i16))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(LineSchedule::from).ok_or(AppError::NotFound)
    }

    async fn schedules(&self, line_id: &str) -> AppResult<Vec<LineSchedule>> {
        let models = ScheduleEntity::find()
            .filter(line_schedule::Column::LineId.eq(line_id))
            .order_by_asc(line_schedule::Column::Dow)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(LineSchedule::from).collect())
    }

    async fn set_schedule(&self, data: NewSchedule, replace: bool) -> AppResult<LineSchedule> {
        data.validate()?;

        if LineEntity::find_by_id(data.line_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AppError::referential(format!("line {}", data.line_id)));
        }

        let existing = ScheduleEntity::find()
            .filter(line_schedule::Column::LineId.eq(data.line_id.as_str()))
            .filter(line_schedule::Column::Dow.eq(data.dow as i16))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match existing {
            Some(row) if replace => {
                // Keep the schedule id stable so seeded LS_* keys survive
                let mut active: ScheduleActiveModel = row.into();
                active.start_time = Set(data.start_time);
                active.end_time = Set(data.end_time);
                active.headway_minutes = Set(data.headway_minutes);

                let model = active.update(&self.db).await.map_err(AppError::from)?;
                Ok(LineSchedule::from(model))
            }
            Some(_) => Err(AppError::validation(format!(
                "line {} already has a schedule for dow {}",
                data.line_id, data.dow
            ))),
            None => {
                let active_model = ScheduleActiveModel {
                    schedule_id: Set(new_id()),
                    line_id: Set(data.line_id),
                    dow: Set(data.dow as i16),
                    start_time: Set(data.start_time),
                    end_time: Set(data.end_time),
                    headway_minutes: Set(data.headway_minutes),
                };

                let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
                Ok(LineSchedule::from(model))
            }
        }
    }
}

//! Driver assignment repository implementation (read side).
//!
//! Writes that must uphold the at-most-one-open invariant go through
//! the transaction-scoped repository in `unit_of_work`; this trait
//! covers lookups shared by services and the query facade.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use super::entities::driver_assignment::{self, Entity as AssignmentEntity};
use crate::domain::DriverAssignment;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Assignment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Find assignment by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<DriverAssignment>>;

    /// The driver's open assignment (end_ts null), if any
    async fn open_for_driver(&self, driver_id: &str) -> AppResult<Option<DriverAssignment>>;

    /// The vehicle's open assignment (end_ts null), if any
    async fn open_for_vehicle(&self, vehicle_id: &str) -> AppResult<Option<DriverAssignment>>;

    /// Assignments in effect on a line at `at`: started, and either
    /// still open or ending after `at`.
    async fn active_for_line(
        &self,
        line_id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<Vec<DriverAssignment>>;

    /// All assignments of a line, newest first
    async fn list_for_line(&self, line_id: &str) -> AppResult<Vec<DriverAssignment>>;
}

/// Concrete implementation of AssignmentRepository
pub struct AssignmentStore {
    db: DatabaseConnection,
}

impl AssignmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssignmentRepository for AssignmentStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<DriverAssignment>> {
        let result = AssignmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(DriverAssignment::from))
    }

    async fn open_for_driver(&self, driver_id: &str) -> AppResult<Option<DriverAssignment>> {
        let result = AssignmentEntity::find()
            .filter(driver_assignment::Column::DriverId.eq(driver_id))
            .filter(driver_assignment::Column::EndTs.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(DriverAssignment::from))
    }

    async fn open_for_vehicle(&self, vehicle_id: &str) -> AppResult<Option<DriverAssignment>> {
        let result = AssignmentEntity::find()
            .filter(driver_assignment::Column::VehicleId.eq(vehicle_id))
            .filter(driver_assignment::Column::EndTs.is_null())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(DriverAssignment::from))
    }

    async fn active_for_line(
        &self,
        line_id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<Vec<DriverAssignment>> {
        let models = AssignmentEntity::find()
            .filter(driver_assignment::Column::LineId.eq(line_id))
            .filter(driver_assignment::Column::StartTs.lte(at))
            .filter(
                Condition::any()
                    .add(driver_assignment::Column::EndTs.is_null())
                    .add(driver_assignment::Column::EndTs.gt(at)),
            )
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(DriverAssignment::from).collect())
    }

    async fn list_for_line(&self, line_id: &str) -> AppResult<Vec<DriverAssignment>> {
        let models = AssignmentEntity::find()
            .filter(driver_assignment::Column::LineId.eq(line_id))
            .order_by_desc(driver_assignment::Column::StartTs)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(DriverAssignment::from).collect())
    }
}

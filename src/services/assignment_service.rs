//! Assignment service - opening and closing driver assignments.
//!
//! This service owns the layer's central invariant: a driver and a
//! vehicle each hold at most one open assignment at a time. Creation
//! runs in a serializable transaction that re-reads the open state
//! immediately before the insert; the partial unique indexes close the
//! race at the store as well.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{DriverAssignment, NewAssignment};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Assignment service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AssignmentService: Send + Sync {
    /// Open a new assignment.
    ///
    /// `Referential` when driver, vehicle or line is missing;
    /// `Conflict` when either the driver or the vehicle already has an
    /// open assignment. Conflict is the one retryable error here, for
    /// callers that will pick a different driver or vehicle.
    async fn create_assignment(&self, data: NewAssignment) -> AppResult<DriverAssignment>;

    /// Close an assignment.
    ///
    /// `InvalidState` when it is already closed or when
    /// `end_ts <= start_ts`. Closed is terminal.
    async fn close_assignment(
        &self,
        assignment_id: &str,
        end_ts: DateTime<Utc>,
    ) -> AppResult<DriverAssignment>;

    /// Get assignment by ID
    async fn get_assignment(&self, id: &str) -> AppResult<DriverAssignment>;

    /// The driver's open assignment, if any
    async fn open_assignment_for_driver(
        &self,
        driver_id: &str,
    ) -> AppResult<Option<DriverAssignment>>;

    /// The vehicle's open assignment, if any
    async fn open_assignment_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> AppResult<Option<DriverAssignment>>;

    /// Assignments in effect on a line at `at`
    async fn active_assignments_for_line(
        &self,
        line_id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<Vec<DriverAssignment>>;
}

/// Concrete implementation of AssignmentService using Unit of Work.
pub struct AssignmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AssignmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AssignmentService for AssignmentManager<U> {
    async fn create_assignment(&self, data: NewAssignment) -> AppResult<DriverAssignment> {
        let created = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.assignments();

                    repo.ensure_driver(&data.driver_id).await?;
                    repo.ensure_vehicle(&data.vehicle_id).await?;
                    repo.ensure_line(&data.line_id).await?;

                    if let Some(open) = repo.open_for_driver(&data.driver_id).await? {
                        return Err(AppError::conflict(format!(
                            "driver {} already has open assignment {}",
                            data.driver_id, open.assignment_id
                        )));
                    }
                    if let Some(open) = repo.open_for_vehicle(&data.vehicle_id).await? {
                        return Err(AppError::conflict(format!(
                            "vehicle {} already has open assignment {}",
                            data.vehicle_id, open.assignment_id
                        )));
                    }

                    repo.insert(data).await
                })
            })
            .await?;

        tracing::info!(
            assignment_id = %created.assignment_id,
            driver_id = %created.driver_id,
            vehicle_id = %created.vehicle_id,
            line_id = %created.line_id,
            "opened assignment"
        );
        Ok(created)
    }

    async fn close_assignment(
        &self,
        assignment_id: &str,
        end_ts: DateTime<Utc>,
    ) -> AppResult<DriverAssignment> {
        let id = assignment_id.to_string();

        let closed = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let repo = ctx.assignments();

                    let assignment = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;
                    assignment.validate_close(end_ts)?;

                    repo.set_end(&id, end_ts).await
                })
            })
            .await?;

        tracing::info!(assignment_id = %closed.assignment_id, "closed assignment");
        Ok(closed)
    }

    async fn get_assignment(&self, id: &str) -> AppResult<DriverAssignment> {
        self.uow
            .assignments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn open_assignment_for_driver(
        &self,
        driver_id: &str,
    ) -> AppResult<Option<DriverAssignment>> {
        self.uow.assignments().open_for_driver(driver_id).await
    }

    async fn open_assignment_for_vehicle(
        &self,
        vehicle_id: &str,
    ) -> AppResult<Option<DriverAssignment>> {
        self.uow.assignments().open_for_vehicle(vehicle_id).await
    }

    async fn active_assignments_for_line(
        &self,
        line_id: &str,
        at: DateTime<Utc>,
    ) -> AppResult<Vec<DriverAssignment>> {
        self.uow.assignments().active_for_line(line_id, at).await
    }
}

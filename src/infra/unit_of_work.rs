//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and manages transaction lifecycle.
//! Every logical operation runs inside one transaction: committed on
//! success, rolled back on error or when the caller abandons the
//! future, so no partial writes become visible.
//!
//! The assignment and trip write paths get transaction-scoped
//! repositories here because their invariants span multiple reads and
//! an insert (open-assignment exclusivity, trip plus tracked stop).

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::{driver, driver_assignment, line, stop, trip, trip_stop, user};
use super::repositories::{
    AssignmentRepository, AssignmentStore, DriverRepository, DriverStore, LineRepository,
    LineStore, SessionRepository, SessionStore, StopRepository, StopStore, TripRepository,
    TripStore, UserRepository, UserStore, VehicleRepository, VehicleStore,
};
use crate::domain::{new_id, DriverAssignment, NewAssignment, NewTrip, Trip, TripStop};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. The generic transaction methods make this trait
/// unsuitable for automock; tests mock the individual repositories or
/// run against a real store.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn sessions(&self) -> Arc<dyn SessionRepository>;
    fn drivers(&self) -> Arc<dyn DriverRepository>;
    fn vehicles(&self) -> Arc<dyn VehicleRepository>;
    fn lines(&self) -> Arc<dyn LineRepository>;
    fn stops(&self) -> Arc<dyn StopRepository>;
    fn assignments(&self) -> Arc<dyn AssignmentRepository>;
    fn trips(&self) -> Arc<dyn TripRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled
    /// back on error. Uses ReadCommitted isolation for balanced
    /// consistency/performance.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable
    /// isolation. Used by the operations that re-read state immediately
    /// before writing (assignment creation).
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Assignment writes for this transaction
    pub fn assignments(&self) -> TxAssignmentRepository<'_> {
        TxAssignmentRepository::new(self.txn)
    }

    /// Trip writes for this transaction
    pub fn trips(&self) -> TxTripRepository<'_> {
        TxTripRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    session_repo: Arc<SessionStore>,
    driver_repo: Arc<DriverStore>,
    vehicle_repo: Arc<VehicleStore>,
    line_repo: Arc<LineStore>,
    stop_repo: Arc<StopStore>,
    assignment_repo: Arc<AssignmentStore>,
    trip_repo: Arc<TripStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            session_repo: Arc::new(SessionStore::new(db.clone())),
            driver_repo: Arc::new(DriverStore::new(db.clone())),
            vehicle_repo: Arc::new(VehicleStore::new(db.clone())),
            line_repo: Arc::new(LineStore::new(db.clone())),
            stop_repo: Arc::new(StopStore::new(db.clone())),
            assignment_repo: Arc::new(AssignmentStore::new(db.clone())),
            trip_repo: Arc::new(TripStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionRepository> {
        self.session_repo.clone()
    }

    fn drivers(&self) -> Arc<dyn DriverRepository> {
        self.driver_repo.clone()
    }

    fn vehicles(&self) -> Arc<dyn VehicleRepository> {
        self.vehicle_repo.clone()
    }

    fn lines(&self) -> Arc<dyn LineRepository> {
        self.line_repo.clone()
    }

    fn stops(&self) -> Arc<dyn StopRepository> {
        self.stop_repo.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        self.assignment_repo.clone()
    }

    fn trips(&self) -> Arc<dyn TripRepository> {
        self.trip_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware assignment repository.
///
/// Executes all operations within the provided transaction so the
/// open-assignment checks and the insert observe one consistent
/// snapshot.
pub struct TxAssignmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAssignmentRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Fail with `Referential` unless the driver exists
    pub async fn ensure_driver(&self, driver_id: &str) -> AppResult<()> {
        driver::Entity::find_by_id(driver_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .map(|_| ())
            .ok_or_else(|| AppError::referential(format!("driver {driver_id}")))
    }

    /// Fail with `Referential` unless the vehicle exists
    pub async fn ensure_vehicle(&self, vehicle_id: &str) -> AppResult<()> {
        vehicle_exists(self.txn, vehicle_id).await
    }

    /// Fail with `Referential` unless the line exists
    pub async fn ensure_line(&self, line_id: &str) -> AppResult<()> {
        line_exists(self.txn, line_id).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<DriverAssignment>> {
        let result = driver_assignment::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(DriverAssignment::from))
    }

    pub async fn open_for_driver(&self, driver_id: &str) -> AppResult<Option<DriverAssignment>> {
        let result = driver_assignment::Entity::find()
            .filter(driver_assignment::Column::DriverId.eq(driver_id))
            .filter(driver_assignment::Column::EndTs.is_null())
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(DriverAssignment::from))
    }

    pub async fn open_for_vehicle(&self, vehicle_id: &str) -> AppResult<Option<DriverAssignment>> {
        let result = driver_assignment::Entity::find()
            .filter(driver_assignment::Column::VehicleId.eq(vehicle_id))
            .filter(driver_assignment::Column::EndTs.is_null())
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(DriverAssignment::from))
    }

    /// Insert a new Open assignment
    pub async fn insert(&self, data: NewAssignment) -> AppResult<DriverAssignment> {
        let active_model = driver_assignment::ActiveModel {
            assignment_id: Set(new_id()),
            driver_id: Set(data.driver_id),
            vehicle_id: Set(data.vehicle_id),
            line_id: Set(data.line_id),
            start_ts: Set(data.start_ts),
            end_ts: Set(None),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(DriverAssignment::from(model))
    }

    /// Set end_ts, moving the assignment to its terminal Closed state.
    /// Callers validate the transition first.
    pub async fn set_end(
        &self,
        id: &str,
        end_ts: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<DriverAssignment> {
        let existing = driver_assignment::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: driver_assignment::ActiveModel = existing.into();
        active.end_ts = Set(Some(end_ts));

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Ok(DriverAssignment::from(model))
    }
}

/// Transaction-aware trip repository: creating a trip and its tracked
/// stop must be atomic.
pub struct TxTripRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxTripRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Fail with `Referential` unless the user exists
    pub async fn ensure_user(&self, user_id: &str) -> AppResult<()> {
        user::Entity::find_by_id(user_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .map(|_| ())
            .ok_or_else(|| AppError::referential(format!("user {user_id}")))
    }

    /// Fail with `Referential` unless the line exists
    pub async fn ensure_line(&self, line_id: &str) -> AppResult<()> {
        line_exists(self.txn, line_id).await
    }

    /// Fail with `Referential` unless the stop exists
    pub async fn ensure_stop(&self, stop_id: &str) -> AppResult<()> {
        stop::Entity::find_by_id(stop_id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?
            .map(|_| ())
            .ok_or_else(|| AppError::referential(format!("stop {stop_id}")))
    }

    /// Insert the trip row
    pub async fn insert(&self, data: NewTrip) -> AppResult<Trip> {
        let active_model = trip::ActiveModel {
            trip_id: Set(new_id()),
            user_id: Set(data.user_id),
            line_id: Set(data.line_id),
            origin_stop_id: Set(data.origin_stop_id),
            dest_stop_id: Set(data.dest_stop_id),
            planned_start: Set(data.planned_start),
            planned_end: Set(data.planned_end),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Trip::from(model))
    }

    /// Insert the trip's tracked stop row
    pub async fn insert_trip_stop(&self, trip_id: &str, stop_id: &str) -> AppResult<TripStop> {
        let active_model = trip_stop::ActiveModel {
            trip_id: Set(trip_id.to_string()),
            stop_id: Set(stop_id.to_string()),
            eta: Set(None),
            ata: Set(None),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(TripStop::from(model))
    }
}

async fn line_exists(txn: &DatabaseTransaction, line_id: &str) -> AppResult<()> {
    line::Entity::find_by_id(line_id)
        .one(txn)
        .await
        .map_err(AppError::from)?
        .map(|_| ())
        .ok_or_else(|| AppError::referential(format!("line {line_id}")))
}

async fn vehicle_exists(txn: &DatabaseTransaction, vehicle_id: &str) -> AppResult<()> {
    use super::repositories::entities::vehicle;

    vehicle::Entity::find_by_id(vehicle_id)
        .one(txn)
        .await
        .map_err(AppError::from)?
        .map(|_| ())
        .ok_or_else(|| AppError::referential(format!("vehicle {vehicle_id}")))
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}

//! Trip repository implementation (read side and arrival updates).
//!
//! Trip creation with its tracked stop is transactional and lives in
//! the unit of work.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::entities::trip::{self, Entity as TripEntity};
use super::entities::trip_stop::{ActiveModel as TripStopActiveModel, Entity as TripStopEntity};
use crate::domain::{Trip, TripStop};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Trip repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Find trip by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Trip>>;

    /// A user's trips, newest planned_start first
    async fn history_for_user(&self, user_id: &str, limit: u64) -> AppResult<Vec<Trip>>;

    /// The trip's tracked stop, if one was recorded
    async fn trip_stop(&self, trip_id: &str) -> AppResult<Option<TripStop>>;

    /// Record the projected arrival on the tracked stop
    async fn set_eta(&self, trip_id: &str, eta: DateTime<Utc>) -> AppResult<TripStop>;

    /// Record the actual arrival on the tracked stop
    async fn set_ata(&self, trip_id: &str, ata: DateTime<Utc>) -> AppResult<TripStop>;

    /// Delete a trip; its tracked stop cascades
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of TripRepository
pub struct TripStore {
    db: DatabaseConnection,
}

impl TripStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn update_trip_stop(
        &self,
        trip_id: &str,
        eta: Option<DateTime<Utc>>,
        ata: Option<DateTime<Utc>>,
    ) -> AppResult<TripStop> {
        let existing = TripStopEntity::find_by_id(trip_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: TripStopActiveModel = existing.into();
        if let Some(eta) = eta {
            active.eta = Set(Some(eta));
        }
        if let Some(ata) = ata {
            active.ata = Set(Some(ata));
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(TripStop::from(model))
    }
}

#[async_trait]
impl TripRepository for TripStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Trip>> {
        let result = TripEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Trip::from))
    }

    async fn history_for_user(&self, user_id: &str, limit: u64) -> AppResult<Vec<Trip>> {
        let models = TripEntity::find()
            .filter(trip::Column::UserId.eq(user_id))
            .order_by_desc(trip::Column::PlannedStart)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Trip::from).collect())
    }

    async fn trip_stop(&self, trip_id: &str) -> AppResult<Option<TripStop>> {
        let result = TripStopEntity::find_by_id(trip_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(TripStop::from))
    }

    async fn set_eta(&self, trip_id: &str, eta: DateTime<Utc>) -> AppResult<TripStop> {
        self.update_trip_stop(trip_id, Some(eta), None).await
    }

    async fn set_ata(&self, trip_id: &str, ata: DateTime<Utc>) -> AppResult<TripStop> {
        self.update_trip_stop(trip_id, None, Some(ata)).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = TripEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

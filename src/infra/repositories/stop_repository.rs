//! Stop repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::stop::{self, ActiveModel, Entity as StopEntity};
use crate::domain::{new_id, NewStop, Stop};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stop repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StopRepository: Send + Sync {
    /// Find stop by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Stop>>;

    /// Find stop by its unique code
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Stop>>;

    /// Create a new stop; rejects duplicate codes
    async fn create(&self, data: NewStop) -> AppResult<Stop>;

    /// List all stops ordered by name
    async fn list(&self) -> AppResult<Vec<Stop>>;
}

/// Concrete implementation of StopRepository
pub struct StopStore {
    db: DatabaseConnection,
}

impl StopStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StopRepository for StopStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Stop>> {
        let result = StopEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Stop::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Stop>> {
        let result = StopEntity::find()
            .filter(stop::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Stop::from))
    }

    async fn create(&self, data: NewStop) -> AppResult<Stop> {
        let existing = StopEntity::find()
            .filter(stop::Column::Code.eq(data.code.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "stop with code {} already exists",
                data.code
            )));
        }

        let active_model = ActiveModel {
            stop_id: Set(new_id()),
            code: Set(data.code),
            name: Set(data.name),
            lat: Set(data.lat),
            lon: Set(data.lon),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Stop::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Stop>> {
        let models = StopEntity::find()
            .order_by_asc(stop::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Stop::from).collect())
    }
}

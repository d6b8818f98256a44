//! Driver repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::driver::{self, ActiveModel, Entity as DriverEntity};
use crate::domain::{new_id, Driver, NewDriver};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Driver repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Find driver by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Driver>>;

    /// Create a new driver; rejects duplicate license numbers
    async fn create(&self, data: NewDriver) -> AppResult<Driver>;

    /// Delete a driver. Their assignments cascade with them.
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// List all drivers ordered by id
    async fn list(&self) -> AppResult<Vec<Driver>>;
}

/// Concrete implementation of DriverRepository
pub struct DriverStore {
    db: DatabaseConnection,
}

impl DriverStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DriverRepository for DriverStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Driver>> {
        let result = DriverEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Driver::from))
    }

    async fn create(&self, data: NewDriver) -> AppResult<Driver> {
        let existing = DriverEntity::find()
            .filter(driver::Column::LicenseNo.eq(data.license_no.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "driver with license {} already exists",
                data.license_no
            )));
        }

        let active_model = ActiveModel {
            driver_id: Set(new_id()),
            full_name: Set(data.full_name),
            license_no: Set(data.license_no),
            hire_date: Set(data.hire_date),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Driver::from(model))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = DriverEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        let models = DriverEntity::find()
            .order_by_asc(driver::Column::DriverId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Driver::from).collect())
    }
}

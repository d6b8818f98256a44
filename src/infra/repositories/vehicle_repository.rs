//! Vehicle repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::vehicle::{self, ActiveModel, Entity as VehicleEntity};
use crate::domain::{new_id, NewVehicle, Vehicle};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Vehicle repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Find vehicle by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Vehicle>>;

    /// Create a new vehicle; rejects duplicate plates and non-positive capacity
    async fn create(&self, data: NewVehicle) -> AppResult<Vehicle>;

    /// Flip the active flag
    async fn set_active(&self, id: &str, active: bool) -> AppResult<Vehicle>;

    /// List active vehicles ordered by plate
    async fn list_active(&self) -> AppResult<Vec<Vehicle>>;

    /// List all vehicles
    async fn list(&self) -> AppResult<Vec<Vehicle>>;
}

/// Concrete implementation of VehicleRepository
pub struct VehicleStore {
    db: DatabaseConnection,
}

impl VehicleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VehicleRepository for VehicleStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let result = VehicleEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Vehicle::from))
    }

    async fn create(&self, data: NewVehicle) -> AppResult<Vehicle> {
        if let Some(capacity) = data.capacity {
            if capacity <= 0 {
                return Err(AppError::validation(format!(
                    "capacity must be positive, got {capacity}"
                )));
            }
        }

        let existing = VehicleEntity::find()
            .filter(vehicle::Column::Plate.eq(data.plate.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "vehicle with plate {} already exists",
                data.plate
            )));
        }

        let active_model = ActiveModel {
            vehicle_id: Set(new_id()),
            plate: Set(data.plate),
            model: Set(data.model),
            capacity: Set(data.capacity),
            active: Set(true),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Vehicle::from(model))
    }

    async fn set_active(&self, id: &str, active: bool) -> AppResult<Vehicle> {
        let existing = VehicleEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: ActiveModel = existing.into();
        active_model.active = Set(active);

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(Vehicle::from(model))
    }

    async fn list_active(&self) -> AppResult<Vec<Vehicle>> {
        let models = VehicleEntity::find()
            .filter(vehicle::Column::Active.eq(true))
            .order_by_asc(vehicle::Column::Plate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Vehicle::from).collect())
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let models = VehicleEntity::find()
            .order_by_asc(vehicle::Column::Plate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Vehicle::from).collect())
    }
}

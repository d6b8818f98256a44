//! Fleet service - drivers and vehicles.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Driver, NewDriver, NewVehicle, Vehicle};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fleet service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FleetService: Send + Sync {
    async fn add_driver(&self, data: NewDriver) -> AppResult<Driver>;

    async fn get_driver(&self, id: &str) -> AppResult<Driver>;

    async fn list_drivers(&self) -> AppResult<Vec<Driver>>;

    /// Delete a driver; their assignments cascade
    async fn remove_driver(&self, id: &str) -> AppResult<()>;

    async fn add_vehicle(&self, data: NewVehicle) -> AppResult<Vehicle>;

    async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle>;

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    async fn list_active_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    /// Take a vehicle out of service without deleting it
    async fn retire_vehicle(&self, id: &str) -> AppResult<Vehicle>;
}

/// Concrete implementation of FleetService using Unit of Work.
pub struct FleetManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FleetManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> FleetService for FleetManager<U> {
    async fn add_driver(&self, data: NewDriver) -> AppResult<Driver> {
        self.uow.drivers().create(data).await
    }

    async fn get_driver(&self, id: &str) -> AppResult<Driver> {
        self.uow.drivers().find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_drivers(&self) -> AppResult<Vec<Driver>> {
        self.uow.drivers().list().await
    }

    async fn remove_driver(&self, id: &str) -> AppResult<()> {
        self.uow.drivers().delete(id).await
    }

    async fn add_vehicle(&self, data: NewVehicle) -> AppResult<Vehicle> {
        self.uow.vehicles().create(data).await
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        self.uow.vehicles().find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.uow.vehicles().list().await
    }

    async fn list_active_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.uow.vehicles().list_active().await
    }

    async fn retire_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        self.uow.vehicles().set_active(id, false).await
    }
}

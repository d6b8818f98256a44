//! Service Container - Centralized service access with parallel
//! execution support.
//!
//! Provides centralized access to all application services, thread-safe
//! via Arc, plus small utilities for running independent reads
//! concurrently.

use std::future::Future;
use std::sync::Arc;

use super::{AssignmentService, FleetService, NetworkService, TripService, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn users(&self) -> Arc<dyn UserService>;
    fn fleet(&self) -> Arc<dyn FleetService>;
    fn network(&self) -> Arc<dyn NetworkService>;
    fn assignments(&self) -> Arc<dyn AssignmentService>;
    fn trips(&self) -> Arc<dyn TripService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    fleet_service: Arc<dyn FleetService>,
    network_service: Arc<dyn NetworkService>,
    assignment_service: Arc<dyn AssignmentService>,
    trip_service: Arc<dyn TripService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        user_service: Arc<dyn UserService>,
        fleet_service: Arc<dyn FleetService>,
        network_service: Arc<dyn NetworkService>,
        assignment_service: Arc<dyn AssignmentService>,
        trip_service: Arc<dyn TripService>,
    ) -> Self {
        Self {
            user_service,
            fleet_service,
            network_service,
            assignment_service,
            trip_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{AssignmentManager, FleetManager, NetworkManager, TripManager, UserManager};

        let uow = Arc::new(Persistence::new(db));

        Self {
            user_service: Arc::new(UserManager::new(uow.clone(), config)),
            fleet_service: Arc::new(FleetManager::new(uow.clone())),
            network_service: Arc::new(NetworkManager::new(uow.clone())),
            assignment_service: Arc::new(AssignmentManager::new(uow.clone())),
            trip_service: Arc::new(TripManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn fleet(&self) -> Arc<dyn FleetService> {
        self.fleet_service.clone()
    }

    fn network(&self) -> Arc<dyn NetworkService> {
        self.network_service.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentService> {
        self.assignment_service.clone()
    }

    fn trips(&self) -> Arc<dyn TripService> {
        self.trip_service.clone()
    }
}

/// Parallel execution utilities for running independent operations
/// concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently and the function returns when
    /// both complete. If either operation fails, the error is returned
    /// immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(f1: F1, f2: F2, f3: F3) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }

    /// Execute a batch of homogeneous operations concurrently,
    /// preserving order. Fails fast on the first error.
    pub async fn batch<F, T>(futures: Vec<F>) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        futures::future::try_join_all(futures).await
    }
}

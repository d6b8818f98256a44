//! User service unit tests over mocked repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::predicate::eq;

use porto_transit::config::Config;
use porto_transit::domain::{NewUser, Role, User, UserSession};
use porto_transit::errors::{AppError, AppResult};
use porto_transit::infra::{
    AssignmentRepository, DriverRepository, LineRepository, MockAssignmentRepository,
    MockDriverRepository, MockLineRepository, MockSessionRepository, MockStopRepository,
    MockTripRepository, MockUserRepository, MockVehicleRepository, SessionRepository,
    StopRepository, TransactionContext, TripRepository, UnitOfWork, UserRepository,
    VehicleRepository,
};
use porto_transit::services::{UserManager, UserService};

fn test_user(id: &str) -> User {
    User {
        user_id: id.to_string(),
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        full_name: "Test User".to_string(),
        role: Role::Passenger,
        created_at: Utc::now(),
        is_active: true,
    }
}

/// Test mock for UnitOfWork wrapping per-repository mocks.
///
/// Repositories default to empty mocks; tests install expectations on
/// the ones they exercise. Transactions are not supported here; the
/// transactional flows are covered by the SQLite-backed integration
/// tests.
struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    sessions: Arc<MockSessionRepository>,
    drivers: Arc<MockDriverRepository>,
    vehicles: Arc<MockVehicleRepository>,
    lines: Arc<MockLineRepository>,
    stops: Arc<MockStopRepository>,
    assignments: Arc<MockAssignmentRepository>,
    trips: Arc<MockTripRepository>,
}

impl TestUnitOfWork {
    fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            sessions: Arc::new(MockSessionRepository::new()),
            drivers: Arc::new(MockDriverRepository::new()),
            vehicles: Arc::new(MockVehicleRepository::new()),
            lines: Arc::new(MockLineRepository::new()),
            stops: Arc::new(MockStopRepository::new()),
            assignments: Arc::new(MockAssignmentRepository::new()),
            trips: Arc::new(MockTripRepository::new()),
        }
    }

    fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    fn with_sessions(mut self, repo: MockSessionRepository) -> Self {
        self.sessions = Arc::new(repo);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionRepository> {
        self.sessions.clone()
    }

    fn drivers(&self) -> Arc<dyn DriverRepository> {
        self.drivers.clone()
    }

    fn vehicles(&self) -> Arc<dyn VehicleRepository> {
        self.vehicles.clone()
    }

    fn lines(&self) -> Arc<dyn LineRepository> {
        self.lines.clone()
    }

    fn stops(&self) -> Arc<dyn StopRepository> {
        self.stops.clone()
    }

    fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        self.assignments.clone()
    }

    fn trips(&self) -> Arc<dyn TripRepository> {
        self.trips.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn service(uow: TestUnitOfWork) -> UserManager<TestUnitOfWork> {
    UserManager::new(Arc::new(uow), Config::for_database_url("sqlite::memory:"))
}

#[tokio::test]
async fn test_get_user_success() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq("u-1"))
        .returning(|id| Ok(Some(test_user(id))));

    let service = service(TestUnitOfWork::new().with_users(repo));
    let result = service.get_user("u-1").await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().user_id, "u-1");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = service(TestUnitOfWork::new().with_users(repo));
    let result = service.get_user("u-404").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_register_rejects_taken_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .with(eq("test@example.com"))
        .returning(|_| Ok(Some(test_user("u-1"))));

    let service = service(TestUnitOfWork::new().with_users(repo));
    let result = service
        .register_user(NewUser {
            email: "test@example.com".to_string(),
            password_hash: "hashed".to_string(),
            full_name: "Another".to_string(),
            role: Role::Passenger,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_register_creates_when_email_free() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_create()
        .returning(|data| {
            let mut user = test_user("u-new");
            user.email = data.email;
            Ok(user)
        });

    let service = service(TestUnitOfWork::new().with_users(repo));
    let result = service
        .register_user(NewUser {
            email: "fresh@example.com".to_string(),
            password_hash: "hashed".to_string(),
            full_name: "Fresh".to_string(),
            role: Role::Passenger,
        })
        .await
        .unwrap();

    assert_eq!(result.email, "fresh@example.com");
}

#[tokio::test]
async fn test_open_session_requires_existing_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = service(TestUnitOfWork::new().with_users(repo));
    let result = service.open_session("ghost", None, None).await;

    assert!(matches!(result.unwrap_err(), AppError::Referential(_)));
}

#[tokio::test]
async fn test_open_session_uses_configured_ttl() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));

    let mut sessions = MockSessionRepository::new();
    sessions.expect_create().returning(|data| {
        assert!(data.expires_at > data.issued_at);
        Ok(UserSession {
            session_id: "s-1".to_string(),
            user_id: data.user_id,
            issued_at: data.issued_at,
            expires_at: data.expires_at,
            user_agent: data.user_agent,
            ip: data.ip,
        })
    });

    let service = service(
        TestUnitOfWork::new()
            .with_users(users)
            .with_sessions(sessions),
    );
    let session = service
        .open_session("u-1", Some("integration-test".to_string()), None)
        .await
        .unwrap();

    assert_eq!(session.user_id, "u-1");
    assert_eq!(
        (session.expires_at - session.issued_at).num_seconds(),
        3600
    );
}

#[tokio::test]
async fn test_expired_session_lookup_is_not_found() {
    let mut sessions = MockSessionRepository::new();
    sessions.expect_find_active().returning(|_, _| Ok(None));

    let service = service(TestUnitOfWork::new().with_sessions(sessions));
    let result = service.get_active_session("stale").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

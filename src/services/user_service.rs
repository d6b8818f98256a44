//! User service - user accounts and their stored sessions.
//!
//! Session handling here is storage only: rows are created, looked up,
//! expired and purged, but no tokens are issued or verified.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{NewSession, NewUser, User, UserSession};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user; `Conflict` when the email is taken
    async fn register_user(&self, data: NewUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Soft-deactivate a user
    async fn deactivate_user(&self, id: &str) -> AppResult<User>;

    /// Hard-delete a user (sessions cascade, trips keep nulled rows)
    async fn delete_user(&self, id: &str) -> AppResult<()>;

    /// Store a session for a user using the configured TTL
    async fn open_session(
        &self,
        user_id: &str,
        user_agent: Option<String>,
        ip: Option<String>,
    ) -> AppResult<UserSession>;

    /// Get a session that is still unexpired; `NotFound` otherwise
    async fn get_active_session(&self, session_id: &str) -> AppResult<UserSession>;

    /// Expire a session now
    async fn close_session(&self, session_id: &str) -> AppResult<()>;

    /// Remove all expired session rows; returns the number removed
    async fn purge_expired_sessions(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register_user(&self, data: NewUser) -> AppResult<User> {
        if self.uow.users().find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "user with email {} already exists",
                data.email
            )));
        }

        let user = self.uow.users().create(data).await?;
        tracing::info!(user_id = %user.user_id, "registered user");
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn deactivate_user(&self, id: &str) -> AppResult<User> {
        self.uow.users().deactivate(id).await
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.uow.users().delete(id).await
    }

    async fn open_session(
        &self,
        user_id: &str,
        user_agent: Option<String>,
        ip: Option<String>,
    ) -> AppResult<UserSession> {
        if self.uow.users().find_by_id(user_id).await?.is_none() {
            return Err(AppError::referential(format!("user {user_id}")));
        }

        let issued_at = Utc::now();
        let session = NewSession {
            user_id: user_id.to_string(),
            issued_at,
            expires_at: issued_at + Duration::seconds(self.config.session_ttl_seconds),
            user_agent,
            ip,
        };

        self.uow.sessions().create(session).await
    }

    async fn get_active_session(&self, session_id: &str) -> AppResult<UserSession> {
        self.uow
            .sessions()
            .find_active(session_id, Utc::now())
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn close_session(&self, session_id: &str) -> AppResult<()> {
        self.uow.sessions().expire(session_id, Utc::now()).await
    }

    async fn purge_expired_sessions(&self) -> AppResult<u64> {
        let removed = self.uow.sessions().purge_expired(Utc::now()).await?;
        if removed > 0 {
            tracing::info!(removed, "purged expired sessions");
        }
        Ok(removed)
    }
}

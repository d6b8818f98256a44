//! User session repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::user_session::{self, ActiveModel, Entity as SessionEntity};
use crate::config::MAX_USER_AGENT_LENGTH;
use crate::domain::{new_id, NewSession, UserSession};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a session row; rejects `expires_at <= issued_at`.
    async fn create(&self, data: NewSession) -> AppResult<UserSession>;

    /// Find session by ID regardless of expiry
    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserSession>>;

    /// Find session by ID only if unexpired at `now`
    async fn find_active(&self, id: &str, now: DateTime<Utc>) -> AppResult<Option<UserSession>>;

    /// Mark a session expired by setting `expires_at = now`
    async fn expire(&self, id: &str, now: DateTime<Utc>) -> AppResult<()>;

    /// Physically delete a session row
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Delete all sessions expired at `now`; returns the number removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// List sessions belonging to a user
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<UserSession>>;
}

/// Concrete implementation of SessionRepository
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn create(&self, data: NewSession) -> AppResult<UserSession> {
        if data.expires_at <= data.issued_at {
            return Err(AppError::validation(format!(
                "expires_at {} must be after issued_at {}",
                data.expires_at, data.issued_at
            )));
        }

        // Oversized user agents are truncated, not rejected
        let user_agent = data
            .user_agent
            .map(|ua| ua.chars().take(MAX_USER_AGENT_LENGTH).collect::<String>());

        let active_model = ActiveModel {
            session_id: Set(new_id()),
            user_id: Set(data.user_id),
            issued_at: Set(data.issued_at),
            expires_at: Set(data.expires_at),
            user_agent: Set(user_agent),
            ip: Set(data.ip),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(UserSession::from(model))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<UserSession>> {
        let result = SessionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserSession::from))
    }

    async fn find_active(&self, id: &str, now: DateTime<Utc>) -> AppResult<Option<UserSession>> {
        let result = SessionEntity::find_by_id(id)
            .filter(user_session::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserSession::from))
    }

    async fn expire(&self, id: &str, now: DateTime<Utc>) -> AppResult<()> {
        let session = SessionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = session.into();
        active.expires_at = Set(now);
        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = SessionEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = SessionEntity::delete_many()
            .filter(user_session::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<UserSession>> {
        let models = SessionEntity::find()
            .filter(user_session::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(UserSession::from).collect())
    }
}

//! Centralized error handling.
//!
//! Provides a unified error type for the entire data service. Every
//! failure surfaces to the caller unchanged; the repository and facade
//! layers perform no recovery beyond transaction rollback.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Entity or key absent
    #[error("Resource not found")]
    NotFound,

    /// Uniqueness or open-assignment violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Illegal state transition (e.g. closing an already-closed assignment)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Foreign key target missing
    #[error("Referential error: missing {0}")]
    Referential(String),

    /// Strict-mode invariant violation (monotonicity, schedule uniqueness)
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code for callers that need to branch without matching variants.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Referential(_) => "REFERENTIAL_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether retrying the same operation can succeed.
    ///
    /// Only `Conflict` qualifies, and only when the caller intends to
    /// target a different driver or vehicle. NotFound, InvalidState and
    /// Validation are terminal for the given input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        AppError::InvalidState(msg.into())
    }

    pub fn referential(key: impl Into<String>) -> Self {
        AppError::Referential(key.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_conflict_is_retryable() {
        assert!(AppError::conflict("driver busy").is_retryable());
        assert!(!AppError::NotFound.is_retryable());
        assert!(!AppError::invalid_state("already closed").is_retryable());
        assert!(!AppError::validation("offset collision").is_retryable());
    }

    #[test]
    fn option_ext_maps_none_to_not_found() {
        let missing: Option<u32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(7).ok_or_not_found().unwrap(), 7);
    }
}

//! User session entity.
//!
//! Sessions are persisted rows only; token issuance and verification
//! are out of scope for this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub session_id: String,
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl UserSession {
    /// Whether the session is still valid at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Session creation data; invariant `expires_at > issued_at` is checked
/// by the repository on insert.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ROLE_ADMIN, ROLE_PASSENGER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Passenger,
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Passenger => ROLE_PASSENGER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => Role::Admin,
            _ => Role::Passenger,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
///
/// The password hash is an opaque string supplied by the caller; this
/// layer never hashes or verifies credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    /// Deactivation flag: users are soft-deactivated, never hard-deleted
    /// while trips reference them.
    pub is_active: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Soft-deactivate the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// User creation data
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("passenger"), Role::Passenger);
        // unknown values default to passenger
        assert_eq!(Role::from("driver"), Role::Passenger);
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}

//! User entity model and DTOs.

use motorshare_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub business_name: Option<String>,
    pub is_admin: bool,
    pub status: String,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub last_login: Option<Timestamp>,
}

/// Redacted user projection for API responses (no password hash, no status
/// internals).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub business_name: Option<String>,
    pub is_admin: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            business_name: user.business_name.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// DTO for inserting a new user. The caller lowercases `email` and hashes
/// the password; `status` defaults to active and `is_admin` to false at the
/// schema level and is never settable here.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub business_name: Option<String>,
    pub avatar_url: Option<String>,
}

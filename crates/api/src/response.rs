//! Shared response envelope types for API handlers.
//!
//! Every success body carries `"success": true` and camelCase field names;
//! failures are rendered by [`crate::error::AppError`] as
//! `{"success": false, "error": ...}`. Use these typed envelopes instead of
//! ad-hoc `serde_json::json!` so serialization stays consistent.

use motorshare_core::types::UserId;
use motorshare_db::models::user::UserProfile;
use serde::Serialize;

/// Returned by register and login: tokens plus the redacted user projection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub session_token: String,
    /// Absent when login was made without "remember me".
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

/// Returned by the refresh endpoint: new tokens, no profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub success: bool,
    pub session_token: String,
    pub refresh_token: Option<String>,
}

/// Returned by `me` and the admin status update.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// Returned by the admin user listing.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<UserProfile>,
}

/// Generic acknowledgement body (logout, delete-account).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Returned by oauth-sync: the resolved account id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    pub message: &'static str,
    pub user_id: UserId,
}

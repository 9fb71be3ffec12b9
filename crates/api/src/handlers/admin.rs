//! Handlers for the `/admin` resource (account status management).
//!
//! All handlers require the administrator flag via [`RequireAdmin`]. The
//! administrator flag itself is never settable through these endpoints.

use axum::extract::{Path, State};
use axum::Json;
use motorshare_core::error::CoreError;
use motorshare_core::roles::{STATUS_ACTIVE, STATUS_SUSPENDED};
use motorshare_core::types::UserId;
use motorshare_db::models::user::UserProfile;
use motorshare_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{UserListResponse, UserResponse};
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// GET /api/v1/admin/users
///
/// List all accounts as redacted projections.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<UserListResponse>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(UserListResponse {
        success: true,
        users: users.iter().map(UserProfile::from).collect(),
    }))
}

/// PUT /api/v1/admin/users/{id}/status
///
/// Suspend or reactivate an account. Suspended accounts cannot log in,
/// refresh, or use existing access tokens against profile endpoints.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<UserResponse>> {
    let status = match input.status.as_deref() {
        Some(s) if s == STATUS_ACTIVE || s == STATUS_SUSPENDED => s,
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Status must be 'active' or 'suspended'".into(),
            )))
        }
    };

    let user = UserRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("User not found".into())))?;

    Ok(Json(UserResponse {
        success: true,
        user: UserProfile::from(&user),
    }))
}

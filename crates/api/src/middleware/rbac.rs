//! Administrator gate.
//!
//! Wraps [`AuthUser`] and rejects identities whose administrator flag is not
//! set. Failing the gate is 403 Forbidden -- a valid identity with
//! insufficient privilege -- never conflated with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use motorshare_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `is_admin == true`. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an administrator here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Core(CoreError::Forbidden("Access denied".into())));
        }
        Ok(RequireAdmin(user))
    }
}

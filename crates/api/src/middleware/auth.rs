//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::HeaderMap;
use axum::http::request::Parts;
use motorshare_core::error::CoreError;
use motorshare_core::types::UserId;

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity decoded from the access token.
///
/// The claims are the sole representation of "who is calling": no database
/// round trip happens here. Handlers that need fresh profile data (e.g.
/// `me`) re-fetch the account themselves.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    /// Marketplace role (`renter`, `owner`, or `both`).
    pub role: String,
    pub is_admin: bool,
}

/// Extract the bearer token from the `Authorization` header.
///
/// Accepts either `Bearer <token>` (prefix stripped case-sensitively) or a
/// raw token as the whole header value.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("authorization")?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("No token provided".into()))
        })?;

        let claims = verify_access_token(token, &state.config.jwt).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            is_admin: claims.is_admin,
        })
    }
}

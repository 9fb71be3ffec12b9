//! Handlers for the `/auth` resource (register, login, refresh, me, logout,
//! delete-account, oauth-sync).
//!
//! Each handler is a stateless request-to-response transaction. Concurrency
//! safety is delegated to the database: the unique index on `users.email` is
//! the true guard against a registration race, the pre-check is a
//! convenience only.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use motorshare_core::error::CoreError;
use motorshare_core::roles::{is_valid_role, ROLE_BOTH, ROLE_RENTER, STATUS_SUSPENDED};
use motorshare_core::validation::{validate_email, validate_password_strength};
use motorshare_db::models::user::{CreateUser, User, UserProfile};
use motorshare_db::repositories::{BookingRepo, CarRepo, ReviewRepo, SessionRepo, UserRepo};
use serde::Deserialize;

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, verify_access_token, verify_provider_token,
    verify_refresh_token,
};
use crate::auth::password::{hash_password, verify_password, OAUTH_SENTINEL};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{bearer_token, AuthUser};
use crate::response::{AuthResponse, MessageResponse, SyncResponse, TokenResponse, UserResponse};
use crate::state::AppState;

/// The generic credential failure returned for both an unknown email and a
/// wrong password, so responses never reveal which emails are registered.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
///
/// Fields are optional at the deserialization layer so missing values yield
/// a 400 with a specific message instead of a body-rejection error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub business_name: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub remember_me: bool,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Request body for `POST /auth/oauth-sync` (trusted provider payload).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OauthSyncRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and return tokens plus the redacted user projection.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    // 1. Required fields.
    let (email, password, first_name, last_name) = match (
        non_empty(input.email),
        non_empty(input.password),
        non_empty(input.first_name),
        non_empty(input.last_name),
    ) {
        (Some(e), Some(p), Some(f), Some(l)) => (e, p, f, l),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Email, password, first name, and last name are required".into(),
            )))
        }
    };

    // 2. Email shape and password policy.
    validate_email(&email).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_password_strength(&password, &state.config.password_policy)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = input.role.unwrap_or_else(|| ROLE_RENTER.to_string());
    if !is_valid_role(&role) {
        return Err(AppError::Core(CoreError::Validation("Invalid role".into())));
    }

    // 3. Uniqueness pre-check (the unique index is the real guard).
    let email = email.to_lowercase();
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    // 4. Hash and insert. A unique violation racing past the pre-check is
    //    classified to the same 409 by the error layer.
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            phone: input.phone,
            role,
            business_name: input.business_name,
            avatar_url: None,
        },
    )
    .await?;

    // 5. Registration always issues both tokens.
    let session_token = issue_access(&user, &state)?;
    let refresh_token = issue_refresh(&user, &state)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            session_token,
            refresh_token: Some(refresh_token),
            user: UserProfile::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. A refresh token is issued only when
/// "remember me" was requested.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (email, password) = match (non_empty(input.email), non_empty(input.password)) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Email and password are required".into(),
            )))
        }
    };

    // Unknown email and wrong password produce the same response.
    let user = UserRepo::find_by_email(&state.pool, &email.to_lowercase())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    if user.status == STATUS_SUSPENDED {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account suspended. Please contact support.".into(),
        )));
    }

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let session_token = issue_access(&user, &state)?;
    let refresh_token = if input.remember_me {
        Some(issue_refresh(&user, &state)?)
    } else {
        None
    };

    // Best-effort: the login response does not depend on this write.
    if let Err(err) = UserRepo::record_login(&state.pool, user.id).await {
        tracing::warn!(error = %err, user_id = %user.id, "Failed to record last login");
    }

    Ok(Json(AuthResponse {
        success: true,
        session_token,
        refresh_token,
        user: UserProfile::from(&user),
    }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new access token (and a fresh
/// refresh token). Refresh tokens are not rotated server-side; the old one
/// stays valid until its natural expiry.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let claims = input
        .refresh_token
        .as_deref()
        .and_then(|token| verify_refresh_token(token, &state.config.jwt))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Re-fetch the account: suspended accounts may not refresh, and a
    // deleted account's outstanding refresh tokens become useless.
    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    if user.status == STATUS_SUSPENDED {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account suspended. Please contact support.".into(),
        )));
    }

    let session_token = issue_access(&user, &state)?;
    let refresh_token = issue_refresh(&user, &state)?;

    Ok(Json(TokenResponse {
        success: true,
        session_token,
        refresh_token: Some(refresh_token),
    }))
}

/// GET /api/v1/auth/me
///
/// Return the caller's profile. The account is re-fetched by id rather than
/// trusted from the token, so deletion or suspension racing an active token
/// is caught here.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("User not found".into())))?;

    if user.status == STATUS_SUSPENDED {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account suspended".into(),
        )));
    }

    Ok(Json(UserResponse {
        success: true,
        user: UserProfile::from(&user),
    }))
}

/// POST /api/v1/auth/logout
///
/// Clear the caller's session rows. Access tokens are stateless and cannot
/// be revoked; the client discards its local copy regardless.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    SessionRepo::delete_for_user(&state.pool, auth.id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Logged out",
    }))
}

/// DELETE /api/v1/auth/delete-account
///
/// Hard-delete the calling account and everything it owns, in dependency
/// order. Accepts either this service's access token or an external
/// provider's token (secondary verification path). Sub-deletions affecting
/// zero rows are normal -- the handler is idempotent; only a failure to
/// delete the account row itself is a 500.
pub async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<MessageResponse>> {
    let token = bearer_token(&headers).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Authentication required".into()))
    })?;

    let user_id = verify_access_token(token, &state.config.jwt)
        .map(|claims| claims.sub)
        .or_else(|| verify_provider_token(token, &state.config.jwt))
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

    // Dependency order: bookings as renter, authored reviews, owned cars
    // (cascading owner-side bookings), sessions, then the account row.
    // Cleanup failures are logged, not surfaced; a row left behind surfaces
    // as an FK error on the final delete.
    if let Err(err) = BookingRepo::delete_for_renter(&state.pool, user_id).await {
        tracing::error!(error = %err, user_id = %user_id, "Booking cleanup failed");
    }
    if let Err(err) = ReviewRepo::delete_for_reviewer(&state.pool, user_id).await {
        tracing::error!(error = %err, user_id = %user_id, "Review cleanup failed");
    }
    if let Err(err) = CarRepo::delete_for_owner(&state.pool, user_id).await {
        tracing::error!(error = %err, user_id = %user_id, "Car cleanup failed");
    }
    if let Err(err) = SessionRepo::delete_for_user(&state.pool, user_id).await {
        tracing::error!(error = %err, user_id = %user_id, "Session cleanup failed");
    }

    // Zero rows affected (account already gone) is still a success.
    UserRepo::delete(&state.pool, user_id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Account deleted successfully",
    }))
}

/// POST /api/v1/auth/oauth-sync
///
/// Upsert an account from an external-provider identity payload. Idempotent:
/// repeated calls with the same email resolve to the same account.
pub async fn oauth_sync(
    State(state): State<AppState>,
    Json(input): Json<OauthSyncRequest>,
) -> AppResult<(StatusCode, Json<SyncResponse>)> {
    let email = non_empty(input.email).ok_or_else(|| {
        AppError::Core(CoreError::Validation("Email is required".into()))
    })?;
    let email = email.to_lowercase();

    if let Some(existing) = UserRepo::find_by_email(&state.pool, &email).await? {
        UserRepo::record_oauth_login(&state.pool, existing.id, input.avatar_url.as_deref())
            .await?;
        return Ok((
            StatusCode::OK,
            Json(SyncResponse {
                success: true,
                message: "User synced",
                user_id: existing.id,
            }),
        ));
    }

    // First-time provider sign-in: sentinel password hash forces these
    // accounts through the OAuth path only.
    let first_name = input
        .first_name
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash: OAUTH_SENTINEL.to_string(),
            first_name,
            last_name: input.last_name.unwrap_or_default(),
            phone: None,
            role: ROLE_BOTH.to_string(),
            business_name: None,
            avatar_url: input.avatar_url,
        },
    )
    .await?;

    if let Err(err) = UserRepo::record_login(&state.pool, user.id).await {
        tracing::warn!(error = %err, user_id = %user.id, "Failed to record last login");
    }

    Ok((
        StatusCode::CREATED,
        Json(SyncResponse {
            success: true,
            message: "User created",
            user_id: user.id,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn issue_access(user: &User, state: &AppState) -> Result<String, AppError> {
    generate_access_token(
        user.id,
        &user.email,
        &user.role,
        user.is_admin,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

fn issue_refresh(user: &User, state: &AppState) -> Result<String, AppError> {
    generate_refresh_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

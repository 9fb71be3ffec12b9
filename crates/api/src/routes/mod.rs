pub mod admin;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register         register (public)
/// /auth/login            login (public)
/// /auth/refresh          refresh (public, refresh token in body)
/// /auth/me               profile fetch (requires auth)
/// /auth/logout           logout (requires auth)
/// /auth/delete-account   delete account (own or provider token)
/// /auth/oauth-sync       provider upsert (trusted payload)
///
/// /admin/users               list accounts (admin only)
/// /admin/users/{id}/status   suspend / reactivate (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}

//! Route definitions for the `/auth` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register        -> register
/// POST   /login           -> login
/// POST   /refresh         -> refresh
/// GET    /me              -> me (requires auth)
/// POST   /logout          -> logout (requires auth)
/// DELETE /delete-account  -> delete_account
/// POST   /oauth-sync      -> oauth_sync
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
        .route("/delete-account", delete(auth::delete_account))
        .route("/oauth-sync", post(auth::oauth_sync))
}

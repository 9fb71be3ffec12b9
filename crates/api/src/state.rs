use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is an `Arc` internally, the config is
/// behind one explicitly).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: motorshare_db::DbPool,
    /// Server configuration (JWT secrets, password policy).
    pub config: Arc<ServerConfig>,
}

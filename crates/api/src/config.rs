use motorshare_core::validation::PasswordPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have sensible defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Password strength rules enforced at registration.
    pub password_policy: PasswordPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `HOST`                     | `0.0.0.0` |
    /// | `PORT`                     | `3000`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`    |
    /// | `PASSWORD_MIN_LENGTH`      | `8`     |
    /// | `PASSWORD_REQUIRE_SPECIAL` | `false` |
    ///
    /// See [`JwtConfig::from_env`] for the token variables.
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values or a missing `JWT_SECRET` --
    /// misconfiguration should fail at startup, not at first request.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let min_length: usize = std::env::var("PASSWORD_MIN_LENGTH")
            .unwrap_or_else(|_| "8".into())
            .parse()
            .expect("PASSWORD_MIN_LENGTH must be a valid usize");

        let require_special = std::env::var("PASSWORD_REQUIRE_SPECIAL")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            host,
            port,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            password_policy: PasswordPolicy {
                min_length,
                require_special,
            },
        }
    }
}

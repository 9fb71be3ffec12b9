//! HTTP client and session manager for the MotorShare API.
//!
//! All traffic goes through [`ApiClient::request`], which attaches the stored
//! bearer token, folds transport and application failures into one
//! [`ApiError`] shape, and tears down local session state the moment the
//! server says the session is no longer valid.

pub mod error;
pub mod storage;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};

pub use error::{ApiError, ErrorKind};
pub use storage::{
    FileStore, MemoryStore, SessionStore, DARK_MODE_KEY, REFRESH_TOKEN_KEY, SESSION_TOKEN_KEY,
    USER_PROFILE_KEY,
};

/// Body error messages that mean the session is gone even when the transport
/// status is 200 (older gateway deployments wrapped auth failures that way).
const SESSION_EXPIRY_PHRASES: &[&str] = &[
    "Invalid or expired session",
    "Invalid or expired token",
    "Unauthorized",
];

/// Client-side configuration, injected at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the API prefix, e.g. `https://host/api/v1`.
    pub api_base_url: String,
    /// Suppresses request-level debug logging when set.
    pub is_production: bool,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>, is_production: bool) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            is_production,
        }
    }
}

/// Registration payload. Optional fields are omitted from the JSON body when
/// unset so the server applies its own defaults.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDetails {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
}

type SessionExpiredCallback = Box<dyn Fn() + Send + Sync>;

/// API client bound to a [`SessionStore`].
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    on_session_expired: Option<SessionExpiredCallback>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
            on_session_expired: None,
        }
    }

    /// Register a callback fired when a request discovers the session has
    /// expired. It runs after local state is cleared, once per failed call.
    pub fn on_session_expired(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Box::new(callback));
        self
    }

    /// Single chokepoint for all API traffic.
    ///
    /// Returns the parsed JSON body on 2xx success. Every failure mode,
    /// transport included, becomes an [`ApiError`]; a 401 (or a recognized
    /// session-expiry message in the body) additionally clears the stored
    /// session. There is no automatic retry or token refresh.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}{}",
            self.config.api_base_url.trim_end_matches('/'),
            path
        );
        if !self.config.is_production {
            tracing::debug!(%method, %url, "api request");
        }

        let mut builder = self.http.request(method, &url);
        if let Some(token) = self.store.get(SESSION_TOKEN_KEY) {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(%url, %err, "request failed before reaching the server");
            ApiError::new(
                ErrorKind::Network,
                "Network error. Please check your connection.",
            )
        })?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Request failed")
            .to_string();

        if status == StatusCode::UNAUTHORIZED || Self::is_session_expiry_message(&body) {
            self.expire_session();
            return Err(ApiError::new(ErrorKind::SessionExpired, message));
        }

        if status.is_success() {
            return Ok(body);
        }

        let kind = match status {
            StatusCode::FORBIDDEN => ErrorKind::AccessDenied,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            s if s.is_server_error() => ErrorKind::Server,
            _ => ErrorKind::Api,
        };
        Err(ApiError::new(kind, message))
    }

    fn is_session_expiry_message(body: &Value) -> bool {
        match body.get("error").and_then(Value::as_str) {
            Some(message) => SESSION_EXPIRY_PHRASES
                .iter()
                .any(|phrase| message.starts_with(phrase)),
            None => false,
        }
    }

    fn expire_session(&self) {
        self.clear_session();
        if let Some(callback) = &self.on_session_expired {
            callback();
        }
    }

    /// Drop all stored session state. The dark-mode preference is a display
    /// setting, not session state, and survives.
    fn clear_session(&self) {
        self.store.remove(SESSION_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_PROFILE_KEY);
    }

    fn persist_auth(&self, body: &Value) {
        if let Some(token) = body.get("sessionToken").and_then(Value::as_str) {
            self.store.set(SESSION_TOKEN_KEY, token);
        }
        if let Some(token) = body.get("refreshToken").and_then(Value::as_str) {
            self.store.set(REFRESH_TOKEN_KEY, token);
        }
        if let Some(user) = body.get("user") {
            if !user.is_null() {
                self.store.set(USER_PROFILE_KEY, &user.to_string());
            }
        }
    }

    /// Log in and persist the returned tokens and profile.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<Value, ApiError> {
        let body = json!({
            "email": email,
            "password": password,
            "rememberMe": remember_me,
        });
        let response = self
            .request(Method::POST, "/auth/login", Some(&body))
            .await?;
        self.persist_auth(&response);
        Ok(response)
    }

    /// Create an account and persist the returned tokens and profile.
    pub async fn register(&self, details: &RegisterDetails) -> Result<Value, ApiError> {
        let body = serde_json::to_value(details)
            .map_err(|err| ApiError::new(ErrorKind::Api, err.to_string()))?;
        let response = self
            .request(Method::POST, "/auth/register", Some(&body))
            .await?;
        self.persist_auth(&response);
        Ok(response)
    }

    /// Notify the server, then clear local state. The server call is
    /// best-effort: the local session is cleared even when it fails.
    pub async fn logout(&self) {
        if let Err(err) = self.request(Method::POST, "/auth/logout", None).await {
            tracing::warn!(%err, "server-side logout failed");
        }
        self.clear_session();
    }

    /// Exchange the stored refresh token for a fresh token pair. Caller
    /// triggered; nothing in the client calls this automatically.
    pub async fn refresh_token(&self) -> Result<Value, ApiError> {
        let refresh = self.store.get(REFRESH_TOKEN_KEY).ok_or_else(|| {
            ApiError::new(ErrorKind::SessionExpired, "No refresh token stored")
        })?;
        let body = json!({ "refreshToken": refresh });
        let response = self
            .request(Method::POST, "/auth/refresh", Some(&body))
            .await?;
        self.persist_auth(&response);
        Ok(response)
    }

    /// Fetch the current account from the server.
    pub async fn me(&self) -> Result<Value, ApiError> {
        self.request(Method::GET, "/auth/me", None).await
    }

    /// Delete the account server-side, then clear local state.
    pub async fn delete_account(&self) -> Result<Value, ApiError> {
        let response = self
            .request(Method::DELETE, "/auth/delete-account", None)
            .await?;
        self.clear_session();
        Ok(response)
    }

    /// Local presence check only; never talks to the server and never
    /// validates the token.
    pub fn is_logged_in(&self) -> bool {
        self.store.get(SESSION_TOKEN_KEY).is_some()
    }

    /// The cached profile from the last successful login/register/refresh.
    /// Missing or corrupt JSON yields `None`, never an error.
    pub fn stored_user(&self) -> Option<Value> {
        let raw = self.store.get(USER_PROFILE_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn dark_mode(&self) -> bool {
        self.store
            .get(DARK_MODE_KEY)
            .is_some_and(|value| value == "true")
    }

    pub fn set_dark_mode(&self, enabled: bool) {
        self.store
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" });
    }
}

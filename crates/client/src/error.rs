use thiserror::Error;

/// Classification of an API failure, so callers can branch without
/// string-matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never reached the server (DNS, connect, timeout).
    Network,
    /// The session is no longer valid; local state has been cleared.
    SessionExpired,
    /// Authenticated but not allowed (HTTP 403).
    AccessDenied,
    /// HTTP 404.
    NotFound,
    /// HTTP 5xx.
    Server,
    /// Any other application-level rejection (validation, conflicts, ...).
    Api,
}

/// Error returned by every [`crate::ApiClient`] operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

//! Authentication, authorization, and cross-origin middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated identity from a bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the administrator flag.
//! - [`cors`] -- Cross-origin policy and preflight handling.

pub mod auth;
pub mod cors;
pub mod rbac;

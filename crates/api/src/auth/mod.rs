//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access/refresh token generation and fail-closed verification.

pub mod jwt;
pub mod password;

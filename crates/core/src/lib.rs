//! Shared domain types, errors, and validation for the motorshare platform.

pub mod error;
pub mod roles;
pub mod types;
pub mod validation;

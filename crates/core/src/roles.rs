//! Well-known role and account-status constants.
//!
//! These must match the CHECK constraints in `20260301000001_create_users.sql`.

/// Account rents cars listed by others.
pub const ROLE_RENTER: &str = "renter";
/// Account lists cars for rent.
pub const ROLE_OWNER: &str = "owner";
/// Account does both (default for OAuth-created accounts).
pub const ROLE_BOTH: &str = "both";

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_SUSPENDED: &str = "suspended";

/// Whether `role` is one of the accepted role names.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_RENTER | ROLE_OWNER | ROLE_BOTH)
}

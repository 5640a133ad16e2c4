//! Well-known role and account status constants.
//!
//! These must match the defaults and CHECK constraints in
//! `20260301000001_create_users_table.sql`.

/// The only role assigned through self-registration.
pub const ROLE_STUDENT: &str = "student";

/// Account may log in and use authenticated endpoints.
pub const USER_STATUS_ACTIVE: &str = "active";

/// Account exists but is blocked from logging in.
pub const USER_STATUS_INACTIVE: &str = "inactive";

/// Whether an account with the given status may authenticate.
pub fn is_active_status(status: &str) -> bool {
    status == USER_STATUS_ACTIVE
}

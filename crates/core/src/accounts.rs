//! Account input limits and normalization (registration, profile, password).
//!
//! The limits are counted in characters, not bytes.

/// Minimum username length.
pub const USERNAME_MIN_LEN: u64 = 3;
/// Maximum username length.
pub const USERNAME_MAX_LEN: u64 = 50;

/// Minimum password length for registration and password change.
pub const PASSWORD_MIN_LEN: u64 = 6;

/// Minimum full name length.
pub const FULL_NAME_MIN_LEN: u64 = 2;
/// Maximum full name length.
pub const FULL_NAME_MAX_LEN: u64 = 100;

pub const MSG_USERNAME_TAKEN: &str = "Username already exists";
pub const MSG_EMAIL_TAKEN: &str = "Email already exists";
pub const MSG_EMAIL_IN_USE: &str = "Email is already used by another user";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const MSG_ACCOUNT_INACTIVE: &str = "Account is not active, please contact an administrator";
pub const MSG_OLD_PASSWORD_INCORRECT: &str = "Old password is incorrect";
pub const MSG_USER_NOT_FOUND: &str = "User not found";

/// Whether a full name, ignoring surrounding whitespace, is within
/// [`FULL_NAME_MIN_LEN`, `FULL_NAME_MAX_LEN`] characters.
pub fn full_name_in_bounds(name: &str) -> bool {
    let len = name.trim().chars().count() as u64;
    (FULL_NAME_MIN_LEN..=FULL_NAME_MAX_LEN).contains(&len)
}

/// Collapse an optional text field so that blank input counts as absent.
///
/// Blank emails must be stored as NULL, never `""`, or the unique email
/// constraint would reject the second user without one.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_bounds_ignore_padding() {
        assert!(full_name_in_bounds("Al"));
        assert!(full_name_in_bounds("  Al  "));
        assert!(full_name_in_bounds(&"n".repeat(100)));
        assert!(full_name_in_bounds("张三"));

        assert!(!full_name_in_bounds(" x "));
        assert!(!full_name_in_bounds("   "));
        assert!(!full_name_in_bounds(&"n".repeat(101)));
    }

    #[test]
    fn blank_values_become_none() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("   ")), None);
    }

    #[test]
    fn non_blank_values_are_trimmed() {
        assert_eq!(non_blank(Some(" a@b.io ")), Some("a@b.io"));
    }
}

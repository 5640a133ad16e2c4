//! Enrollment lifecycle rules.
//!
//! ```text
//! (none) --enroll--> active --unenroll--> dropped
//! ```
//!
//! An enrollment row is created at most once per (student, course) pair. Any
//! existing row, including a dropped one, blocks a new enrollment, and there
//! is no `dropped -> active` transition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Enrollment is in effect.
pub const STATUS_ACTIVE: &str = "active";
/// Student has left the course.
pub const STATUS_DROPPED: &str = "dropped";

/// All valid enrollment statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_DROPPED];

pub const MSG_ALREADY_ENROLLED: &str = "You are already enrolled in this course";
pub const MSG_NOT_ENROLLED: &str = "You are not enrolled in this course";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Active => STATUS_ACTIVE,
            EnrollmentStatus::Dropped => STATUS_DROPPED,
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(EnrollmentStatus::Active),
            STATUS_DROPPED => Ok(EnrollmentStatus::Dropped),
            other => Err(CoreError::Internal(format!(
                "Unknown enrollment status '{other}'. Must be one of: {VALID_STATUSES:?}"
            ))),
        }
    }
}

/// Decide whether a student may enroll given the current row for the pair.
///
/// Returns the status the new row must be created with.
pub fn check_enroll(existing: Option<EnrollmentStatus>) -> Result<EnrollmentStatus, CoreError> {
    match existing {
        None => Ok(EnrollmentStatus::Active),
        Some(_) => Err(CoreError::Conflict(MSG_ALREADY_ENROLLED.into())),
    }
}

/// Decide whether a student may drop the course given the current row.
///
/// Returns the status the row must be moved to.
pub fn check_drop(current: Option<EnrollmentStatus>) -> Result<EnrollmentStatus, CoreError> {
    match current {
        Some(EnrollmentStatus::Active) => Ok(EnrollmentStatus::Dropped),
        _ => Err(CoreError::NotFound(MSG_NOT_ENROLLED.into())),
    }
}

/// Require an active enrollment (course progress reads and writes).
pub fn require_active(current: Option<EnrollmentStatus>) -> Result<(), CoreError> {
    match current {
        Some(EnrollmentStatus::Active) => Ok(()),
        _ => Err(CoreError::NotFound(MSG_NOT_ENROLLED.into())),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn enroll_without_existing_row_creates_active() {
        assert_eq!(check_enroll(None).unwrap(), EnrollmentStatus::Active);
    }

    #[test]
    fn enroll_with_any_existing_row_conflicts() {
        assert_matches!(
            check_enroll(Some(EnrollmentStatus::Active)),
            Err(CoreError::Conflict(msg)) if msg == MSG_ALREADY_ENROLLED
        );
        // A dropped row still blocks re-enrollment.
        assert_matches!(
            check_enroll(Some(EnrollmentStatus::Dropped)),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn drop_requires_active() {
        assert_eq!(
            check_drop(Some(EnrollmentStatus::Active)).unwrap(),
            EnrollmentStatus::Dropped
        );
        assert_matches!(check_drop(None), Err(CoreError::NotFound(msg)) if msg == MSG_NOT_ENROLLED);
        assert_matches!(
            check_drop(Some(EnrollmentStatus::Dropped)),
            Err(CoreError::NotFound(_))
        );
    }

    #[test]
    fn require_active_rejects_dropped_and_missing() {
        assert!(require_active(Some(EnrollmentStatus::Active)).is_ok());
        assert!(require_active(Some(EnrollmentStatus::Dropped)).is_err());
        assert!(require_active(None).is_err());
    }

    #[test]
    fn status_parses_from_column_value() {
        for s in VALID_STATUSES {
            let parsed: EnrollmentStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), *s);
        }
        assert!("pending".parse::<EnrollmentStatus>().is_err());
    }
}

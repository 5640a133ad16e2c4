//! Learning-progress status rules.
//!
//! A progress row is keyed by (enrollment, courseware). The first update
//! creates it; later updates overwrite status and timestamp unconditionally,
//! so every status may follow every other (including `completed ->
//! not_started`). Only the status value itself is validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_NOT_STARTED: &str = "not_started";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid progress statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_NOT_STARTED, STATUS_IN_PROGRESS, STATUS_COMPLETED];

pub const MSG_INVALID_STATUS: &str = "Invalid status value";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    /// Used when an update does not name a status.
    #[default]
    Completed,
}

impl ProgressStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => STATUS_NOT_STARTED,
            ProgressStatus::InProgress => STATUS_IN_PROGRESS,
            ProgressStatus::Completed => STATUS_COMPLETED,
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_NOT_STARTED => Ok(ProgressStatus::NotStarted),
            STATUS_IN_PROGRESS => Ok(ProgressStatus::InProgress),
            STATUS_COMPLETED => Ok(ProgressStatus::Completed),
            _ => Err(CoreError::Validation(MSG_INVALID_STATUS.into())),
        }
    }
}

/// Resolve the requested status of a progress update.
///
/// `None` means the caller did not name one, which records completion.
pub fn parse_requested(status: Option<&str>) -> Result<ProgressStatus, CoreError> {
    match status {
        None => Ok(ProgressStatus::default()),
        Some(s) => s.parse(),
    }
}

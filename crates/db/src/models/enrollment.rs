//! Enrollment entity model and DTOs.

use coursehub_core::enrollment::EnrollmentStatus;
use coursehub_core::error::CoreError;
use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::course::CourseResponse;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow)]
pub struct Enrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub course_id: DbId,
    pub status: String,
    pub enrolled_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Enrollment {
    /// Parse the stored status column.
    pub fn status(&self) -> Result<EnrollmentStatus, CoreError> {
        self.status.parse()
    }
}

/// An enrollment with its course, as listed under "my courses".
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub enrollment_id: DbId,
    pub course: CourseResponse,
    pub enrolled_at: Timestamp,
    pub status: String,
}

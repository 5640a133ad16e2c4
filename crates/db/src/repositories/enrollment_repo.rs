//! Repository for the `enrollments` table.
//!
//! The `uq_enrollments_student_course` constraint makes
//! [`EnrollmentRepo::create_if_absent`] atomic under concurrent requests.

use coursehub_core::enrollment::{STATUS_ACTIVE, STATUS_DROPPED};
use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::Enrollment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, course_id, status, enrolled_at, created_at, updated_at";

/// Provides CRUD operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Find the enrollment row for a (student, course) pair, whatever its status.
    pub async fn find(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM enrollments WHERE student_id = $1 AND course_id = $2");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// Create an active enrollment unless a row for the pair already exists.
    ///
    /// Returns `None` when a row (active or dropped) was already present; the
    /// existing row is left untouched.
    pub async fn create_if_absent(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (student_id, course_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (student_id, course_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(course_id)
            .bind(STATUS_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Move an `active` enrollment to `dropped`.
    ///
    /// Returns `false` if there was no active enrollment for the pair.
    pub async fn drop_active(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE enrollments SET status = $3
             WHERE student_id = $1 AND course_id = $2 AND status = $4",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(STATUS_DROPPED)
        .bind(STATUS_ACTIVE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a student's active enrollments, most recent first.
    pub async fn list_active_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments
             WHERE student_id = $1 AND status = $2
             ORDER BY enrolled_at DESC, id DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(student_id)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Count rows for a pair (0 or 1 given the unique constraint).
    ///
    /// Used by tests to check that re-enrolling never adds a row.
    pub async fn count_for_pair(
        pool: &PgPool,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }
}

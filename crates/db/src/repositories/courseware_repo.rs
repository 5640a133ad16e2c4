//! Repository for the `coursewares` table.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::courseware::{Courseware, CreateCourseware};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, title, content_url, duration_minutes, order_index, \
                        created_at, updated_at";

/// Provides CRUD operations for coursewares.
pub struct CoursewareRepo;

impl CoursewareRepo {
    /// Insert a new courseware, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourseware,
    ) -> Result<Courseware, sqlx::Error> {
        let query = format!(
            "INSERT INTO coursewares (course_id, title, content_url, duration_minutes, order_index)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Courseware>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.content_url)
            .bind(input.duration_minutes)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// List a course's coursewares in display order (ties broken by insertion).
    pub async fn list_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Courseware>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coursewares WHERE course_id = $1 ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Courseware>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Find a courseware only if it belongs to the given course.
    pub async fn find_in_course(
        pool: &PgPool,
        id: DbId,
        course_id: DbId,
    ) -> Result<Option<Courseware>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coursewares WHERE id = $1 AND course_id = $2");
        sqlx::query_as::<_, Courseware>(&query)
            .bind(id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }
}

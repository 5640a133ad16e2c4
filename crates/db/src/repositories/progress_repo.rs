//! Repository for the `learning_progress` table.

use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress::LearningProgress;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, enrollment_id, courseware_id, status, last_viewed_at, \
                        progress_detail, created_at, updated_at";

/// Provides CRUD operations for learning progress.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Record progress for an (enrollment, courseware) pair in one statement.
    ///
    /// - No row yet: inserts one with `status` and `last_viewed_at = NOW()`.
    /// - Row exists: overwrites `status` and `last_viewed_at`; replaces
    ///   `progress_detail` only when `detail` is `Some`.
    ///
    /// The caller is responsible for checking that the enrollment is active and
    /// the courseware belongs to the enrolled course.
    pub async fn upsert(
        pool: &PgPool,
        enrollment_id: DbId,
        courseware_id: DbId,
        status: &str,
        detail: Option<&serde_json::Value>,
    ) -> Result<LearningProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO learning_progress (enrollment_id, courseware_id, status, last_viewed_at, progress_detail)
             VALUES ($1, $2, $3, NOW(), $4)
             ON CONFLICT (enrollment_id, courseware_id) DO UPDATE
             SET status = EXCLUDED.status,
                 last_viewed_at = EXCLUDED.last_viewed_at,
                 progress_detail = COALESCE(EXCLUDED.progress_detail, learning_progress.progress_detail)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearningProgress>(&query)
            .bind(enrollment_id)
            .bind(courseware_id)
            .bind(status)
            .bind(detail)
            .fetch_one(pool)
            .await
    }

    /// List an enrollment's progress rows ordered like the coursewares they track.
    pub async fn list_for_enrollment(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Vec<LearningProgress>, sqlx::Error> {
        sqlx::query_as::<_, LearningProgress>(
            "SELECT lp.id, lp.enrollment_id, lp.courseware_id, lp.status, lp.last_viewed_at, \
                    lp.progress_detail, lp.created_at, lp.updated_at \
             FROM learning_progress lp \
             JOIN coursewares cw ON cw.id = lp.courseware_id \
             WHERE lp.enrollment_id = $1 \
             ORDER BY cw.order_index, cw.id",
        )
        .bind(enrollment_id)
        .fetch_all(pool)
        .await
    }

    /// Find the progress row for a pair, if any.
    ///
    /// Handlers read progress through the enrollment-wide queries; this backs tests.
    pub async fn find(
        pool: &PgPool,
        enrollment_id: DbId,
        courseware_id: DbId,
    ) -> Result<Option<LearningProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learning_progress WHERE enrollment_id = $1 AND courseware_id = $2"
        );
        sqlx::query_as::<_, LearningProgress>(&query)
            .bind(enrollment_id)
            .bind(courseware_id)
            .fetch_optional(pool)
            .await
    }
}

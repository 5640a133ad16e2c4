//! Learning progress entity model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::courseware::CoursewareResponse;

/// A row from the `learning_progress` table.
#[derive(Debug, Clone, FromRow)]
pub struct LearningProgress {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub courseware_id: DbId,
    pub status: String,
    pub last_viewed_at: Option<Timestamp>,
    pub progress_detail: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LearningProgressResponse {
    pub progress_id: DbId,
    pub courseware: CoursewareResponse,
    pub status: String,
    pub last_viewed_at: Option<Timestamp>,
    pub progress_detail: Option<serde_json::Value>,
}

impl LearningProgressResponse {
    pub fn new(progress: &LearningProgress, courseware: CoursewareResponse) -> Self {
        Self {
            progress_id: progress.id,
            courseware,
            status: progress.status.clone(),
            last_viewed_at: progress.last_viewed_at,
            progress_detail: progress.progress_detail.clone(),
        }
    }
}

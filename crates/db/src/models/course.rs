//! Course entity model, list filter, and response DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::courseware::CoursewareResponse;
use super::user::UserResponse;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub creator_id: Option<DbId>,
    pub category: Option<String>,
    pub level: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a course. Courses are authored outside this API; the
/// repository insert is used by seeding and tests.
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub creator_id: Option<DbId>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
}

/// Optional filters for the published course listing.
///
/// Empty strings are treated like absent filters.
#[derive(Debug, Default, Clone)]
pub struct CourseFilter {
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact level match.
    pub level: Option<String>,
}

/// Course as returned by the API, with its creator embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub creator: Option<UserResponse>,
    pub category: Option<String>,
    pub level: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CourseResponse {
    pub fn new(course: &Course, creator: Option<UserResponse>) -> Self {
        Self {
            course_id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            cover_image_url: course.cover_image_url.clone(),
            creator,
            category: course.category.clone(),
            level: course.level.clone(),
            status: course.status.clone(),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

/// One page of the published course listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Course detail: the course, its ordered coursewares, and, for
/// authenticated callers only, whether they hold an active enrollment.
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub coursewares: Vec<CoursewareResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enrolled: Option<bool>,
}

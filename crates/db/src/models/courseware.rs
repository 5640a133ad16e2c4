//! Courseware entity model and DTOs.

use coursehub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `coursewares` table.
#[derive(Debug, Clone, FromRow)]
pub struct Courseware {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub content_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseware {
    pub course_id: DbId,
    pub title: String,
    pub content_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursewareResponse {
    pub courseware_id: DbId,
    pub title: String,
    pub content_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub order_index: i32,
}

impl From<&Courseware> for CoursewareResponse {
    fn from(cw: &Courseware) -> Self {
        Self {
            courseware_id: cw.id,
            title: cw.title.clone(),
            content_url: cw.content_url.clone(),
            duration_minutes: cw.duration_minutes,
            order_index: cw.order_index,
        }
    }
}

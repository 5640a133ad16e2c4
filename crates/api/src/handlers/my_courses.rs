//! Handlers for the caller's own enrollments and learning progress.

use std::collections::HashMap;

use axum::extract::State;
use coursehub_core::course::MSG_COURSEWARE_NOT_FOUND;
use coursehub_core::enrollment;
use coursehub_core::error::CoreError;
use coursehub_core::progress;
use coursehub_core::types::DbId;
use coursehub_db::models::courseware::CoursewareResponse;
use coursehub_db::models::enrollment::{Enrollment, EnrollmentResponse};
use coursehub_db::models::progress::LearningProgressResponse;
use coursehub_db::repositories::{CourseRepo, CoursewareRepo, EnrollmentRepo, ProgressRepo};
use coursehub_db::DbPool;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{EnvelopePath, OptionalJson, ValidatedQuery};
use crate::handlers::courses::{course_responses, current_status, enrollment_response};
use crate::middleware::auth::AuthUser;
use crate::query::ProgressParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Optional JSON body of a progress update.
#[derive(Debug, Default, Deserialize)]
pub struct ProgressBody {
    /// Overrides `?status=` when present.
    pub status: Option<String>,
    pub progress_detail: Option<serde_json::Value>,
}

/// GET /api/my-courses
///
/// Active enrollments only, most recent first.
pub async fn list_my_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<ApiResponse<Vec<EnrollmentResponse>>> {
    let enrollments = EnrollmentRepo::list_active_for_student(&state.pool, auth_user.user_id).await?;

    let course_ids: Vec<DbId> = enrollments.iter().map(|e| e.course_id).collect();
    let courses = CourseRepo::find_by_ids(&state.pool, &course_ids).await?;
    let responses = course_responses(&state.pool, &courses).await?;
    let by_id: HashMap<DbId, _> = responses.into_iter().map(|c| (c.course_id, c)).collect();

    let data = enrollments
        .iter()
        .filter_map(|e| {
            by_id
                .get(&e.course_id)
                .map(|course| enrollment_response(e, course.clone()))
        })
        .collect();

    Ok(ApiResponse::ok(data, "My courses loaded"))
}

/// GET /api/my-courses/{id}/progress
///
/// Progress rows that exist for the caller's active enrollment, in courseware
/// order. Coursewares never touched have no row.
pub async fn get_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    EnvelopePath(course_id): EnvelopePath<DbId>,
) -> AppResult<ApiResponse<Vec<LearningProgressResponse>>> {
    let enrollment = active_enrollment(&state.pool, auth_user.user_id, course_id).await?;

    let rows = ProgressRepo::list_for_enrollment(&state.pool, enrollment.id).await?;
    let coursewares: HashMap<DbId, CoursewareResponse> =
        CoursewareRepo::list_for_course(&state.pool, course_id)
            .await?
            .iter()
            .map(|cw| (cw.id, CoursewareResponse::from(cw)))
            .collect();

    let data = rows
        .iter()
        .filter_map(|row| {
            coursewares
                .get(&row.courseware_id)
                .map(|cw| LearningProgressResponse::new(row, cw.clone()))
        })
        .collect();

    Ok(ApiResponse::ok(data, "Progress loaded"))
}

/// POST /api/my-courses/{id}/courseware/{cw_id}/progress
///
/// Records the status of one courseware. The status comes from the JSON body,
/// then `?status=`, then defaults to `completed`; it is validated before any
/// lookup. `progress_detail` replaces the stored detail only when supplied.
pub async fn update_progress(
    State(state): State<AppState>,
    auth_user: AuthUser,
    EnvelopePath((course_id, courseware_id)): EnvelopePath<(DbId, DbId)>,
    ValidatedQuery(params): ValidatedQuery<ProgressParams>,
    OptionalJson(body): OptionalJson<ProgressBody>,
) -> AppResult<ApiResponse<LearningProgressResponse>> {
    let body = body.unwrap_or_default();
    let requested = body.status.as_deref().or(params.status.as_deref());
    let status = progress::parse_requested(requested)?;

    if let Some(detail) = &body.progress_detail {
        if !detail.is_object() {
            return Err(CoreError::Validation("progress_detail must be a JSON object".into()).into());
        }
    }

    let enrollment = active_enrollment(&state.pool, auth_user.user_id, course_id).await?;

    let courseware = CoursewareRepo::find_in_course(&state.pool, courseware_id, course_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(MSG_COURSEWARE_NOT_FOUND.into()))?;

    let row = ProgressRepo::upsert(
        &state.pool,
        enrollment.id,
        courseware.id,
        status.as_str(),
        body.progress_detail.as_ref(),
    )
    .await?;

    tracing::info!(
        user_id = auth_user.user_id,
        course_id,
        courseware_id,
        status = %status,
        "Progress recorded"
    );

    Ok(ApiResponse::ok(
        LearningProgressResponse::new(&row, CoursewareResponse::from(&courseware)),
        "Progress updated",
    ))
}

/// Load the caller's enrollment for a course, requiring it to be active.
async fn active_enrollment(pool: &DbPool, student_id: DbId, course_id: DbId) -> AppResult<Enrollment> {
    let row = EnrollmentRepo::find(pool, student_id, course_id).await?;
    enrollment::require_active(current_status(row.as_ref())?)?;
    row.ok_or_else(|| CoreError::NotFound(enrollment::MSG_NOT_ENROLLED.into()).into())
}

//! Handlers for the public course catalogue and enrollment.

use std::collections::HashMap;

use axum::extract::State;
use coursehub_core::accounts::non_blank;
use coursehub_core::course::{MSG_COURSE_NOT_FOUND, MSG_COURSE_UNAVAILABLE};
use coursehub_core::enrollment::{self, EnrollmentStatus};
use coursehub_core::error::CoreError;
use coursehub_core::pagination::PageWindow;
use coursehub_core::types::DbId;
use coursehub_db::models::course::{
    Course, CourseDetailResponse, CourseFilter, CourseListResponse, CourseResponse,
};
use coursehub_db::models::courseware::CoursewareResponse;
use coursehub_db::models::enrollment::{Enrollment, EnrollmentResponse};
use coursehub_db::models::user::UserResponse;
use coursehub_db::repositories::{CourseRepo, CoursewareRepo, EnrollmentRepo, UserRepo};
use coursehub_db::DbPool;

use crate::error::AppResult;
use crate::extract::{EnvelopePath, ValidatedQuery};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::CourseListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/courses
///
/// Published courses only, newest first. `page` is clamped into the valid
/// range and echoed back as the page actually served.
pub async fn list_courses(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CourseListParams>,
) -> AppResult<ApiResponse<CourseListResponse>> {
    let filter = CourseFilter {
        search: non_blank(params.search.as_deref()).map(str::to_string),
        category: non_blank(params.category.as_deref()).map(str::to_string),
        level: non_blank(params.level.as_deref()).map(str::to_string),
    };

    let total = CourseRepo::count_published(&state.pool, &filter).await?;
    let window = PageWindow::resolve(params.page, params.per_page, total);
    let courses =
        CourseRepo::list_published(&state.pool, &filter, window.limit(), window.offset()).await?;

    Ok(ApiResponse::ok(
        CourseListResponse {
            courses: course_responses(&state.pool, &courses).await?,
            total: window.total,
            page: window.page,
            per_page: window.per_page,
            total_pages: window.total_pages,
        },
        "Courses loaded",
    ))
}

/// GET /api/courses/{id}
///
/// `is_enrolled` is only present for an authenticated caller.
pub async fn get_course(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    EnvelopePath(course_id): EnvelopePath<DbId>,
) -> AppResult<ApiResponse<CourseDetailResponse>> {
    let course = find_published(&state.pool, course_id).await?;
    let coursewares = CoursewareRepo::list_for_course(&state.pool, course.id).await?;

    let is_enrolled = match caller {
        Some(user) => {
            let existing = EnrollmentRepo::find(&state.pool, user.user_id, course.id).await?;
            Some(current_status(existing.as_ref())? == Some(EnrollmentStatus::Active))
        }
        None => None,
    };

    let creator = load_creator(&state.pool, &course).await?;

    Ok(ApiResponse::ok(
        CourseDetailResponse {
            course: CourseResponse::new(&course, creator),
            coursewares: coursewares.iter().map(CoursewareResponse::from).collect(),
            is_enrolled,
        },
        "Course detail loaded",
    ))
}

/// POST /api/courses/{id}/enroll
///
/// The course must be published and the caller must have no enrollment row
/// for it, not even a dropped one.
pub async fn enroll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    EnvelopePath(course_id): EnvelopePath<DbId>,
) -> AppResult<ApiResponse<EnrollmentResponse>> {
    let course = find_published(&state.pool, course_id).await?;

    let existing = EnrollmentRepo::find(&state.pool, auth_user.user_id, course.id).await?;
    enrollment::check_enroll(current_status(existing.as_ref())?)?;

    // A concurrent enroll may win between the check and the insert.
    let created = EnrollmentRepo::create_if_absent(&state.pool, auth_user.user_id, course.id)
        .await?
        .ok_or_else(|| CoreError::Conflict(enrollment::MSG_ALREADY_ENROLLED.into()))?;

    tracing::info!(
        user_id = auth_user.user_id,
        course_id = course.id,
        enrollment_id = created.id,
        "Student enrolled"
    );

    let creator = load_creator(&state.pool, &course).await?;
    Ok(ApiResponse::ok(
        enrollment_response(&created, CourseResponse::new(&course, creator)),
        "Enrolled successfully",
    ))
}

/// POST /api/courses/{id}/unenroll
///
/// The course only has to exist; an unpublished course can still be left.
pub async fn unenroll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    EnvelopePath(course_id): EnvelopePath<DbId>,
) -> AppResult<ApiResponse<()>> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(MSG_COURSE_NOT_FOUND.into()))?;

    let existing = EnrollmentRepo::find(&state.pool, auth_user.user_id, course.id).await?;
    enrollment::check_drop(current_status(existing.as_ref())?)?;

    if !EnrollmentRepo::drop_active(&state.pool, auth_user.user_id, course.id).await? {
        return Err(CoreError::NotFound(enrollment::MSG_NOT_ENROLLED.into()).into());
    }

    tracing::info!(user_id = auth_user.user_id, course_id = course.id, "Student unenrolled");
    Ok(ApiResponse::message("Unenrolled successfully"))
}

// ---------------------------------------------------------------------------
// Helpers shared with `my_courses`
// ---------------------------------------------------------------------------

/// Look up a course that is visible to students.
pub(crate) async fn find_published(pool: &DbPool, course_id: DbId) -> AppResult<Course> {
    CourseRepo::find_published(pool, course_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(MSG_COURSE_UNAVAILABLE.into()).into())
}

/// Parse the status of an optional enrollment row.
pub(crate) fn current_status(
    row: Option<&Enrollment>,
) -> Result<Option<EnrollmentStatus>, CoreError> {
    row.map(Enrollment::status).transpose()
}

pub(crate) fn enrollment_response(row: &Enrollment, course: CourseResponse) -> EnrollmentResponse {
    EnrollmentResponse {
        enrollment_id: row.id,
        course,
        enrolled_at: row.enrolled_at,
        status: row.status.clone(),
    }
}

/// Build course responses with their creators, loading all creators in one query.
pub(crate) async fn course_responses(
    pool: &DbPool,
    courses: &[Course],
) -> AppResult<Vec<CourseResponse>> {
    let mut creator_ids: Vec<DbId> = courses.iter().filter_map(|c| c.creator_id).collect();
    creator_ids.sort_unstable();
    creator_ids.dedup();

    let creators: HashMap<DbId, UserResponse> = if creator_ids.is_empty() {
        HashMap::new()
    } else {
        UserRepo::find_by_ids(pool, &creator_ids)
            .await?
            .iter()
            .map(|u| (u.id, UserResponse::from(u)))
            .collect()
    };

    Ok(courses
        .iter()
        .map(|c| {
            let creator = c.creator_id.and_then(|id| creators.get(&id).cloned());
            CourseResponse::new(c, creator)
        })
        .collect())
}

async fn load_creator(pool: &DbPool, course: &Course) -> AppResult<Option<UserResponse>> {
    let Some(creator_id) = course.creator_id else {
        return Ok(None);
    };
    Ok(UserRepo::find_by_id(pool, creator_id)
        .await?
        .as_ref()
        .map(UserResponse::from))
}

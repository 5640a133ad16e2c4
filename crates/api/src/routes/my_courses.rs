//! Route definitions for the `/my-courses` resource. Every route requires auth.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::my_courses;
use crate::state::AppState;

/// Routes mounted at `/my-courses`.
///
/// ```text
/// GET  /                                    -> list_my_courses
/// GET  /{id}/progress                       -> get_progress
/// POST /{id}/courseware/{cw_id}/progress    -> update_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_courses::list_my_courses))
        .route("/{id}/progress", get(my_courses::get_progress))
        .route(
            "/{id}/courseware/{cw_id}/progress",
            post(my_courses::update_progress),
        )
}

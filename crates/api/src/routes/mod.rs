pub mod auth;
pub mod courses;
pub mod health;
pub mod liveness;
pub mod my_courses;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/profile                                    get, update (requires auth)
/// /auth/change-password                            change password (requires auth)
///
/// /courses                                         list published (public)
/// /courses/{id}                                    detail (optional auth)
/// /courses/{id}/enroll                             enroll (requires auth)
/// /courses/{id}/unenroll                           unenroll (requires auth)
///
/// /my-courses                                      active enrollments
/// /my-courses/{id}/progress                        progress of one course
/// /my-courses/{id}/courseware/{cw_id}/progress     record progress (POST)
///
/// /test                                            liveness (public)
/// /test/auth                                       liveness (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/courses", courses::router())
        .nest("/my-courses", my_courses::router())
        .nest("/test", liveness::router())
}

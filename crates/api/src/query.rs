//! Query parameter types shared by handler modules.

use serde::Deserialize;
use validator::Validate;

/// `GET /courses` parameters (`?page=&per_page=&search=&category=&level=`).
///
/// Page numbers and sizes are clamped rather than rejected; see
/// [`coursehub_core::pagination::PageWindow::resolve`].
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CourseListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
}

/// Progress update parameters (`?status=`). A JSON body `status` takes
/// precedence over this one.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProgressParams {
    pub status: Option<String>,
}

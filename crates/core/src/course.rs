//! Course and courseware constants.

/// Courses with this status are visible to listing and detail queries.
pub const COURSE_STATUS_PUBLISHED: &str = "published";
/// Default status for newly created courses.
pub const COURSE_STATUS_DRAFT: &str = "draft";

/// Default course level.
pub const DEFAULT_COURSE_LEVEL: &str = "beginner";

/// Returned for missing and non-published courses alike, so a draft is
/// indistinguishable from a nonexistent id.
pub const MSG_COURSE_UNAVAILABLE: &str = "Course not found or not published";
pub const MSG_COURSE_NOT_FOUND: &str = "Course not found";
pub const MSG_COURSEWARE_NOT_FOUND: &str = "Courseware not found";

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod course_repo;
pub mod courseware_repo;
pub mod enrollment_repo;
pub mod progress_repo;
pub mod user_repo;

pub use course_repo::CourseRepo;
pub use courseware_repo::CoursewareRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use progress_repo::ProgressRepo;
pub use user_repo::UserRepo;

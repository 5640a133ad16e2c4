//! Request handlers, one module per resource.
//!
//! Handlers are thin: they take validated input and the resolved caller,
//! apply the domain rules from `coursehub_core`, talk to the repositories, and
//! return an [`ApiResponse`](crate::response::ApiResponse).

pub mod auth;
pub mod courses;
pub mod liveness;
pub mod my_courses;

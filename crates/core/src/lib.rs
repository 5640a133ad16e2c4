//! Domain rules for the course enrollment API.
//!
//! This crate has no I/O. It holds the error taxonomy, shared id/timestamp
//! types, well-known status constants, input limits, pagination math and the
//! enrollment / learning-progress state machines used by the repository and
//! HTTP layers.

pub mod accounts;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod pagination;
pub mod progress;
pub mod roles;
pub mod types;

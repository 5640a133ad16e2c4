//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` response struct for the API envelope, where one is needed
//! - `Deserialize` DTOs for inserts and partial updates

pub mod course;
pub mod courseware;
pub mod enrollment;
pub mod progress;
pub mod user;

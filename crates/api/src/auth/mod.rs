//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access/refresh token generation and validation.

pub mod jwt;
pub mod password;

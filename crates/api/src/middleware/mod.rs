//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid access token; rejects with 401.
//! - [`auth::MaybeAuthUser`] -- Resolves a caller if one is present, otherwise anonymous.

pub mod auth;

//! JWT-based authentication extractors for Axum handlers.
//!
//! Extractors run before the handler body, so a rejected token short-circuits
//! the request before any input is parsed or business logic runs.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use coursehub_core::error::CoreError;
use coursehub_core::types::DbId;
use coursehub_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, TOKEN_TYPE_ACCESS};
use crate::error::AppError;
use crate::state::AppState;

/// Message of every authentication rejection, whatever the underlying cause.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

/// Authenticated caller extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token must be a valid access token whose subject still exists and is
/// `active`; anything else rejects with 401.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<ApiResponse<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(ApiResponse::message("ok"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, TOKEN_TYPE_ACCESS, &state.config.jwt)
            .map_err(|e| unauthorized(&format!("Invalid or expired token: {e}")))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| unauthorized("Token subject no longer exists"))?;
        if !user.is_active() {
            return Err(unauthorized("Account is not active"));
        }

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

/// Optional caller for endpoints that behave differently when authenticated.
///
/// A missing, malformed, or expired token resolves to `MaybeAuthUser(None)`
/// instead of rejecting the request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(AppError::Core(CoreError::Unauthorized(reason))) => {
                tracing::debug!(reason = %reason, "Ignoring unusable credentials on optional-auth route");
                Ok(MaybeAuthUser(None))
            }
            Err(other) => Err(other),
        }
    }
}

fn unauthorized(reason: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(reason.to_string()))
}

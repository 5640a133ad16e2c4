//! Reachability checks for clients (`/test`, `/test/auth`).

use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    pub username: String,
    pub role: String,
}

/// GET /api/test
pub async fn ping() -> ApiResponse<()> {
    ApiResponse::message("API is reachable")
}

/// GET /api/test/auth
pub async fn ping_auth(auth_user: AuthUser) -> AppResult<ApiResponse<WhoAmI>> {
    let message = format!("Authenticated as {}", auth_user.username);
    Ok(ApiResponse::ok(
        WhoAmI {
            username: auth_user.username,
            role: auth_user.role,
        },
        message,
    ))
}

use axum::routing::get;
use axum::Router;

use crate::handlers::liveness;
use crate::state::AppState;

/// Routes mounted at `/test`.
///
/// ```text
/// GET /      -> ping
/// GET /auth  -> ping_auth (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness::ping))
        .route("/auth", get(liveness::ping_auth))
}

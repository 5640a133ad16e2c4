//! The `{ code, data, message }` envelope wrapped around every API result.
//!
//! Handlers return [`ApiResponse`] on success; failures are
//! [`AppError`](crate::error::AppError) values rendered into the same shape
//! by its `IntoResponse` impl. Business outcomes are distinguished by `code`,
//! not by the HTTP status, which stays `200 OK` for everything except
//! authentication failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// `code` of a successful envelope.
pub const CODE_SUCCESS: i32 = 200;
/// `code` of a business failure envelope.
pub const CODE_FAILURE: i32 = -1;
/// `code` of an authentication failure envelope (sent with HTTP 401).
pub const CODE_UNAUTHORIZED: i32 = 401;

/// Uniform response envelope.
///
/// `data` serializes as `null` when absent.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: i32,
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope carrying a payload.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            data: Some(data),
            message: message.into(),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            data: None,
            message: message.into(),
        }
    }

    /// Failure envelope with the given code and no payload.
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(json!({ "id": 1 }), "done")).unwrap();
        assert_eq!(body, json!({ "code": 200, "data": { "id": 1 }, "message": "done" }));
    }

    #[test]
    fn message_only_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::message("Logged out")).unwrap();
        assert_eq!(body, json!({ "code": 200, "data": null, "message": "Logged out" }));
    }

    #[test]
    fn failure_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::failure(CODE_FAILURE, "nope")).unwrap();
        assert_eq!(body, json!({ "code": -1, "data": null, "message": "nope" }));
    }

    #[test]
    fn envelope_is_sent_with_http_200() {
        let response = ApiResponse::message("hi").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

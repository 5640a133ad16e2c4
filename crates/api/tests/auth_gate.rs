//! Envelope and auth-gate behaviour that never reaches the database.
//!
//! Every test runs against a pool that cannot connect, so a passing test also
//! proves the request was rejected before any query was issued.

mod common;

use axum::http::StatusCode;
use common::{
    assert_failure, body_json, build_test_app, envelope, get, get_auth, lazy_pool, post_json,
    post_raw, test_config,
};
use coursehub_api::auth::jwt::{generate_access_token, generate_refresh_token, JwtConfig};
use serde_json::json;

const PROTECTED: &[(&str, &str)] = &[
    ("POST", "/api/auth/logout"),
    ("GET", "/api/auth/profile"),
    ("PUT", "/api/auth/profile"),
    ("POST", "/api/auth/change-password"),
    ("POST", "/api/courses/1/enroll"),
    ("POST", "/api/courses/1/unenroll"),
    ("GET", "/api/my-courses"),
    ("GET", "/api/my-courses/1/progress"),
    ("POST", "/api/my-courses/1/courseware/1/progress"),
    ("GET", "/api/test/auth"),
];

async fn request(method: &str, uri: &str, token: Option<&str>) -> axum::response::Response {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }
    build_test_app(lazy_pool())
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn assert_unauthorized(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({ "code": 401, "data": null, "message": "Authentication required" })
    );
}

// ---------------------------------------------------------------------------
// Auth gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    for (method, uri) in PROTECTED {
        assert_unauthorized(request(method, uri, None).await).await;
    }
}

#[tokio::test]
async fn protected_routes_reject_garbage_token() {
    for (method, uri) in PROTECTED {
        assert_unauthorized(request(method, uri, Some("Bearer not-a-jwt")).await).await;
    }
}

#[tokio::test]
async fn wrong_scheme_is_rejected() {
    let token = generate_access_token(1, "alice", "student", &test_config().jwt).unwrap();
    let response = request("GET", "/api/my-courses", Some(&format!("Token {token}"))).await;
    assert_unauthorized(response).await;
}

#[tokio::test]
async fn refresh_token_is_not_an_access_token() {
    let token = generate_refresh_token(1, "alice", "student", &test_config().jwt).unwrap();
    let response = request("GET", "/api/my-courses", Some(&format!("Bearer {token}"))).await;
    assert_unauthorized(response).await;
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let foreign = JwtConfig {
        secret: "some-other-secret".to_string(),
        ..test_config().jwt
    };
    let token = generate_access_token(1, "alice", "student", &foreign).unwrap();
    let response = get_auth(build_test_app(lazy_pool()), "/api/test/auth", &token).await;
    assert_unauthorized(response).await;
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let expired = JwtConfig {
        access_token_expiry_mins: -10,
        ..test_config().jwt
    };
    let token = generate_access_token(1, "alice", "student", &expired).unwrap();
    let response = get_auth(build_test_app(lazy_pool()), "/api/auth/profile", &token).await;
    assert_unauthorized(response).await;
}

// ---------------------------------------------------------------------------
// Validation envelopes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn liveness_needs_no_database() {
    let json = envelope(get(build_test_app(lazy_pool()), "/api/test").await).await;
    assert_eq!(
        json,
        json!({ "code": 200, "data": null, "message": "API is reachable" })
    );
}

#[tokio::test]
async fn short_username_is_a_business_failure() {
    let body = json!({ "username": "ab", "password": "secret123", "full_name": "Al Ice" });
    let response = post_json(build_test_app(lazy_pool()), "/api/auth/register", body).await;
    let json = envelope(response).await;
    assert_failure(&json, "Username must be 3 to 50 characters");
}

#[tokio::test]
async fn several_invalid_fields_are_reported_together() {
    let body = json!({ "username": "ab", "password": "123", "full_name": "Al Ice" });
    let response = post_json(build_test_app(lazy_pool()), "/api/auth/register", body).await;
    let json = envelope(response).await;
    assert_failure(
        &json,
        "Password must be at least 6 characters; Username must be 3 to 50 characters",
    );
}

#[tokio::test]
async fn missing_required_field_is_a_business_failure() {
    let body = json!({ "username": "alice" });
    let response = post_json(build_test_app(lazy_pool()), "/api/auth/login", body).await;
    let json = envelope(response).await;
    assert_eq!(json["code"], -1);
    assert!(json["data"].is_null());
    assert!(
        json["message"].as_str().unwrap().contains("password"),
        "message should name the missing field: {json}"
    );
}

#[tokio::test]
async fn malformed_json_is_a_business_failure() {
    let response = post_raw(
        build_test_app(lazy_pool()),
        "/api/auth/login",
        "application/json",
        "{ not json",
    )
    .await;
    let json = envelope(response).await;
    assert_eq!(json["code"], -1);
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn non_numeric_course_id_is_a_business_failure() {
    let response = get(build_test_app(lazy_pool()), "/api/courses/abc").await;
    let json = envelope(response).await;
    assert_eq!(json["code"], -1);
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let response = get(build_test_app(lazy_pool()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = get(build_test_app(lazy_pool()), "/api/test").await;
    assert!(response.headers().contains_key("x-request-id"));
}

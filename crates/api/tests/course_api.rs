//! HTTP-level integration tests for the course catalogue and enrollment.

mod common;

use common::{
    assert_failure, build_test_app, create_course, create_courseware, create_published_course,
    create_user, envelope, get, get_auth, post_empty_auth, success_data, token_for,
};
use coursehub_core::course::COURSE_STATUS_DRAFT;
use coursehub_db::repositories::EnrollmentRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_hides_unpublished_courses(pool: PgPool) {
    create_published_course(&pool, "Rust Basics").await;
    create_course(&pool, "Secret Draft", COURSE_STATUS_DRAFT).await;

    let json = envelope(get(build_test_app(pool), "/api/courses").await).await;
    assert_eq!(json["message"], "Courses loaded");
    let data = success_data(&json);
    assert_eq!(data["total"], 1);
    let courses = data["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Rust Basics");
    assert_eq!(courses[0]["status"], "published");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn pagination_metadata_is_consistent(pool: PgPool) {
    for i in 0..25 {
        create_published_course(&pool, &format!("Course {i:02}")).await;
    }

    let json = envelope(get(build_test_app(pool.clone()), "/api/courses?per_page=12").await).await;
    let data = success_data(&json);
    assert_eq!(data["total"], 25);
    assert_eq!(data["per_page"], 12);
    assert_eq!(data["total_pages"], 3);
    assert_eq!(data["page"], 1);
    assert_eq!(data["courses"].as_array().unwrap().len(), 12);

    let json = envelope(get(build_test_app(pool.clone()), "/api/courses?page=3").await).await;
    let data = success_data(&json);
    assert_eq!(data["page"], 3);
    assert_eq!(data["courses"].as_array().unwrap().len(), 1);

    // Past the end clamps to the last page.
    let json = envelope(get(build_test_app(pool), "/api/courses?page=99").await).await;
    assert_eq!(success_data(&json)["page"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn newest_courses_come_first(pool: PgPool) {
    create_published_course(&pool, "Older").await;
    create_published_course(&pool, "Newer").await;

    let json = envelope(get(build_test_app(pool), "/api/courses").await).await;
    let titles: Vec<_> = success_data(&json)["courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_is_case_insensitive(pool: PgPool) {
    create_published_course(&pool, "Advanced RUST").await;
    create_published_course(&pool, "Cooking").await;

    let json = envelope(get(build_test_app(pool), "/api/courses?search=rust").await).await;
    let data = success_data(&json);
    assert_eq!(data["total"], 1);
    assert_eq!(data["courses"][0]["title"], "Advanced RUST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_listing_has_one_page(pool: PgPool) {
    let json = envelope(get(build_test_app(pool), "/api/courses").await).await;
    let data = success_data(&json);
    assert_eq!(data["total"], 0);
    assert_eq!(data["total_pages"], 1);
    assert_eq!(data["courses"], json!([]));
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn detail_lists_coursewares_in_order(pool: PgPool) {
    let course = create_published_course(&pool, "Rust Basics").await;
    create_courseware(&pool, course.id, "Second", 2).await;
    create_courseware(&pool, course.id, "First", 1).await;

    let uri = format!("/api/courses/{}", course.id);
    let json = envelope(get(build_test_app(pool), &uri).await).await;
    assert_eq!(json["message"], "Course detail loaded");
    let data = success_data(&json);
    assert_eq!(data["course_id"], course.id);
    assert_eq!(data["coursewares"][0]["title"], "First");
    assert_eq!(data["coursewares"][1]["title"], "Second");
    // Anonymous callers get no enrollment flag at all.
    assert!(data.get("is_enrolled").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn detail_reports_enrollment_for_authenticated_caller(pool: PgPool) {
    let course = create_published_course(&pool, "Rust Basics").await;
    let user = create_user(&pool, "alice").await;
    let token = token_for(&user);
    let uri = format!("/api/courses/{}", course.id);

    let json = envelope(get_auth(build_test_app(pool.clone()), &uri, &token).await).await;
    assert_eq!(json["data"]["is_enrolled"], false);

    EnrollmentRepo::create_if_absent(&pool, user.id, course.id).await.unwrap();
    let json = envelope(get_auth(build_test_app(pool.clone()), &uri, &token).await).await;
    assert_eq!(json["data"]["is_enrolled"], true);

    EnrollmentRepo::drop_active(&pool, user.id, course.id).await.unwrap();
    let json = envelope(get_auth(build_test_app(pool), &uri, &token).await).await;
    assert_eq!(json["data"]["is_enrolled"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn detail_with_bad_token_is_anonymous(pool: PgPool) {
    let course = create_published_course(&pool, "Rust Basics").await;
    let uri = format!("/api/courses/{}", course.id);

    let json = envelope(get_auth(build_test_app(pool), &uri, "garbage").await).await;
    assert_eq!(json["code"], 200);
    assert!(json["data"].get("is_enrolled").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unpublished_course_detail_is_unavailable(pool: PgPool) {
    let course = create_course(&pool, "Draft", COURSE_STATUS_DRAFT).await;
    let uri = format!("/api/courses/{}", course.id);

    let json = envelope(get(build_test_app(pool.clone()), &uri).await).await;
    assert_failure(&json, "Course not found or not published");

    let json = envelope(get(build_test_app(pool), "/api/courses/999999").await).await;
    assert_failure(&json, "Course not found or not published");
}

// ---------------------------------------------------------------------------
// Enrollment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn enroll_then_list_my_courses(pool: PgPool) {
    let course = create_published_course(&pool, "Rust Basics").await;
    let user = create_user(&pool, "alice").await;
    let token = token_for(&user);

    let uri = format!("/api/courses/{}/enroll", course.id);
    let json = envelope(post_empty_auth(build_test_app(pool.clone()), &uri, &token).await).await;
    assert_eq!(json["message"], "Enrolled successfully");
    let data = success_data(&json);
    assert_eq!(data["status"], "active");
    assert_eq!(data["course"]["course_id"], course.id);

    let json = envelope(get_auth(build_test_app(pool), "/api/my-courses", &token).await).await;
    assert_eq!(json["message"], "My courses loaded");
    let list = success_data(&json).as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["course"]["title"], "Rust Basics");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn enrolling_twice_conflicts(pool: PgPool) {
    let course = create_published_course(&pool, "Rust Basics").await;
    let user = create_user(&pool, "alice").await;
    let token = token_for(&user);
    let uri = format!("/api/courses/{}/enroll", course.id);

    envelope(post_empty_auth(build_test_app(pool.clone()), &uri, &token).await).await;
    let json = envelope(post_empty_auth(build_test_app(pool.clone()), &uri, &token).await).await;

    assert_failure(&json, "You are already enrolled in this course");
    assert_eq!(
        EnrollmentRepo::count_for_pair(&pool, user.id, course.id).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn enrolling_in_draft_course_fails(pool: PgPool) {
    let course = create_course(&pool, "Draft", COURSE_STATUS_DRAFT).await;
    let user = create_user(&pool, "alice").await;

    let uri = format!("/api/courses/{}/enroll", course.id);
    let json = envelope(post_empty_auth(build_test_app(pool.clone()), &uri, &token_for(&user)).await).await;

    assert_failure(&json, "Course not found or not published");
    assert_eq!(
        EnrollmentRepo::count_for_pair(&pool, user.id, course.id).await.unwrap(),
        0
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unenroll_without_enrollment_fails(pool: PgPool) {
    let course = create_published_course(&pool, "Rust Basics").await;
    let user = create_user(&pool, "alice").await;

    let uri = format!("/api/courses/{}/unenroll", course.id);
    let json = envelope(post_empty_auth(build_test_app(pool), &uri, &token_for(&user)).await).await;
    assert_failure(&json, "You are not enrolled in this course");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unenroll_from_missing_course_fails(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let json = envelope(
        post_empty_auth(build_test_app(pool), "/api/courses/424242/unenroll", &token_for(&user)).await,
    )
    .await;
    assert_failure(&json, "Course not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dropped_enrollment_blocks_re_enrollment(pool: PgPool) {
    let course = create_published_course(&pool, "Rust Basics").await;
    let user = create_user(&pool, "alice").await;
    let token = token_for(&user);
    let enroll = format!("/api/courses/{}/enroll", course.id);
    let unenroll = format!("/api/courses/{}/unenroll", course.id);

    envelope(post_empty_auth(build_test_app(pool.clone()), &enroll, &token).await).await;
    let json = envelope(post_empty_auth(build_test_app(pool.clone()), &unenroll, &token).await).await;
    assert_eq!(json, json!({ "code": 200, "data": null, "message": "Unenrolled successfully" }));

    // Dropped courses disappear from the caller's list.
    let json = envelope(get_auth(build_test_app(pool.clone()), "/api/my-courses", &token).await).await;
    assert_eq!(success_data(&json), &json!([]));

    let json = envelope(post_empty_auth(build_test_app(pool.clone()), &enroll, &token).await).await;
    assert_failure(&json, "You are already enrolled in this course");

    // A second unenroll finds nothing active.
    let json = envelope(post_empty_auth(build_test_app(pool), &unenroll, &token).await).await;
    assert_failure(&json, "You are not enrolled in this course");
}

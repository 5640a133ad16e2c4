//! Repository for the `courses` table.
//!
//! Every read used by the public API is scoped to `status = 'published'`.

use coursehub_core::course::{COURSE_STATUS_DRAFT, COURSE_STATUS_PUBLISHED, DEFAULT_COURSE_LEVEL};
use coursehub_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CourseFilter, CreateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, cover_image_url, creator_id, category, \
                        level, status, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    ///
    /// `level` and `status` default to `beginner` and `draft` when `None`.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (title, description, cover_image_url, creator_id, category, level, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image_url)
            .bind(input.creator_id)
            .bind(&input.category)
            .bind(input.level.as_deref().unwrap_or(DEFAULT_COURSE_LEVEL))
            .bind(input.status.as_deref().unwrap_or(COURSE_STATUS_DRAFT))
            .fetch_one(pool)
            .await
    }

    /// Find a course by ID regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by ID only if it is published.
    pub async fn find_published(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1 AND status = $2");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(COURSE_STATUS_PUBLISHED)
            .fetch_optional(pool)
            .await
    }

    /// Load several courses at once. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Course>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = ANY($1)");
        sqlx::query_as::<_, Course>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Count published courses matching the filter.
    pub async fn count_published(pool: &PgPool, filter: &CourseFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, binds) = published_where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM courses {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in binds {
            q = q.bind(value);
        }
        q.fetch_one(pool).await
    }

    /// List one page of published courses matching the filter, newest first.
    pub async fn list_published(
        pool: &PgPool,
        filter: &CourseFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let (where_clause, binds) = published_where_clause(filter);
        let limit_idx = binds.len() + 1;
        let offset_idx = binds.len() + 2;
        let query = format!(
            "SELECT {COLUMNS} FROM courses {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let mut q = sqlx::query_as::<_, Course>(&query);
        for value in binds {
            q = q.bind(value);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}

/// Build the `WHERE` clause for the published listing.
///
/// Returns the clause and its bind values in placeholder order; every filter
/// value is text, so one `Vec<String>` carries them all.
fn published_where_clause(filter: &CourseFilter) -> (String, Vec<String>) {
    let mut conditions = vec!["status = $1".to_string()];
    let mut binds = vec![COURSE_STATUS_PUBLISHED.to_string()];

    if let Some(search) = non_empty(&filter.search) {
        binds.push(like_pattern(search));
        let idx = binds.len();
        conditions.push(format!("(title ILIKE ${idx} OR description ILIKE ${idx})"));
    }
    if let Some(category) = non_empty(&filter.category) {
        binds.push(category.to_string());
        conditions.push(format!("category = ${}", binds.len()));
    }
    if let Some(level) = non_empty(&filter.level) {
        binds.push(level.to_string());
        conditions.push(format!("level = ${}", binds.len()));
    }

    (format!("WHERE {}", conditions.join(" AND ")), binds)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Wrap a search term for a substring `ILIKE`, escaping LIKE metacharacters
/// so `%` and `_` in user input match literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

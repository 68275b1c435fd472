/// Course model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE courses (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     tags TEXT NOT NULL DEFAULT '',
///     image TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The `image` column holds the generated filename of an uploaded cover
/// image inside the uploads directory, or NULL when the course has none.
/// The file itself is owned by exactly one course row; deleting the row is
/// followed by best-effort removal of the file (handled by the API layer,
/// which owns the uploads directory).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Course model representing a catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    /// Unique course ID
    pub id: i64,

    /// Course title
    pub title: String,

    /// Course description
    pub description: String,

    /// Free-form comma-separated tags
    pub tags: String,

    /// Generated filename of the cover image, if one was uploaded
    pub image: Option<String>,

    /// When the course was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new course
#[derive(Debug, Clone)]
pub struct CreateCourse {
    /// Course title
    pub title: String,

    /// Course description
    pub description: String,

    /// Free-form tags
    pub tags: String,

    /// Generated cover image filename, if an image was uploaded
    pub image: Option<String>,
}

impl Course {
    /// Creates a new course
    pub async fn create(pool: &PgPool, data: CreateCourse) -> Result<Self, sqlx::Error> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (title, description, tags, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, tags, image, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.tags)
        .bind(data.image)
        .fetch_one(pool)
        .await?;

        Ok(course)
    }

    /// Finds a course by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, tags, image, created_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(course)
    }

    /// Checks whether a course row exists for the given id
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM courses WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Lists all courses, newest id first, no pagination
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, tags, image, created_at
            FROM courses
            ORDER BY id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    /// Lists the courses a user is NOT enrolled in, newest id first
    pub async fn list_available(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, tags, image, created_at
            FROM courses
            WHERE id NOT IN (SELECT course_id FROM course_progress WHERE user_id = $1)
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    /// Deletes a course and all its enrollment rows
    ///
    /// Enrollment cleanup and the course deletion run inside one
    /// transaction. Removal of the cover image file is the caller's job,
    /// after a successful return.
    ///
    /// # Returns
    ///
    /// True if the course existed and was deleted, false otherwise.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM course_progress WHERE course_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of courses
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

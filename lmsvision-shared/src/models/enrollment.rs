/// Enrollment model and database operations
///
/// An enrollment (`course_progress` row) links one user to one course with a
/// progress status. At most one enrollment may exist per (user, course)
/// pair; the `course_progress_user_id_course_id_key` unique constraint is
/// the authoritative guard, with the application's pre-insert check
/// providing the friendlier error message.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE course_progress (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users (id),
///     course_id BIGINT NOT NULL REFERENCES courses (id),
///     status TEXT NOT NULL DEFAULT 'pending',
///     enrolled_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (user_id, course_id)
/// );
/// ```
///
/// Status transitions beyond the initial `pending` are made by collaborators
/// outside this backend; no completion endpoint exists here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Progress status of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Enrolled, course not yet finished
    Pending,

    /// Course finished
    Completed,
}

impl EnrollmentStatus {
    /// Converts status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Completed => "completed",
        }
    }
}

/// Enrollment model representing one `course_progress` row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    /// Unique enrollment ID
    pub id: i64,

    /// The enrolled user
    pub user_id: i64,

    /// The course enrolled in
    pub course_id: i64,

    /// Progress status
    pub status: EnrollmentStatus,

    /// When the user enrolled
    pub enrolled_at: DateTime<Utc>,
}

/// A course joined with the enrollment that links it to a user
///
/// Returned by the enrolled-courses listing: all course fields plus the
/// enrollment's status and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EnrolledCourse {
    /// Course ID
    pub id: i64,

    /// Course title
    pub title: String,

    /// Course description
    pub description: String,

    /// Course tags
    pub tags: String,

    /// Course cover image filename, if any
    pub image: Option<String>,

    /// When the course was created
    pub created_at: DateTime<Utc>,

    /// Enrollment progress status
    pub status: EnrollmentStatus,

    /// When the user enrolled
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    /// Creates a new enrollment with status `pending`
    ///
    /// # Errors
    ///
    /// A duplicate (user, course) pair violates the unique constraint and
    /// surfaces as a database error; callers map it to a conflict.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        course_id: i64,
    ) -> Result<Self, sqlx::Error> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO course_progress (user_id, course_id, status)
            VALUES ($1, $2, 'pending')
            RETURNING id, user_id, course_id, status, enrolled_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(enrollment)
    }

    /// Checks whether an enrollment exists for the (user, course) pair
    pub async fn exists(
        pool: &PgPool,
        user_id: i64,
        course_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM course_progress WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Lists a user's enrolled courses with their enrollment status,
    /// most recently enrolled first
    pub async fn list_enrolled_courses(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
        let courses = sqlx::query_as::<_, EnrolledCourse>(
            r#"
            SELECT c.id, c.title, c.description, c.tags, c.image, c.created_at,
                   p.status, p.enrolled_at
            FROM courses c
            JOIN course_progress p ON c.id = p.course_id
            WHERE p.user_id = $1
            ORDER BY p.enrolled_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    /// Counts enrollments with the given status
    pub async fn count_by_status(
        pool: &PgPool,
        status: EnrollmentStatus,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM course_progress WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(EnrollmentStatus::Pending.as_str(), "pending");
        assert_eq!(EnrollmentStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn test_enrolled_course_includes_status_fields() {
        let course = EnrolledCourse {
            id: 9,
            title: "T".to_string(),
            description: "D".to_string(),
            tags: String::new(),
            image: None,
            created_at: Utc::now(),
            status: EnrollmentStatus::Pending,
            enrolled_at: Utc::now(),
        };

        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("enrolled_at").is_some());
    }
}

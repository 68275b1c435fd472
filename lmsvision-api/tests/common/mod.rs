/// Common test utilities for integration tests
///
/// Provides shared infrastructure:
/// - Test database setup (created if absent, migrations run on first use)
/// - A router wired to a throwaway uploads directory
/// - Fixture helpers for users, courses, and enrollments
/// - Request helpers for the action endpoint
///
/// Tests share one database (from `DATABASE_URL`), so fixtures use unique
/// emails/titles and assertions are containment-based rather than equality
/// on whole listings.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use lmsvision_api::app::{build_router, AppState};
use lmsvision_api::config::Config;
use lmsvision_shared::auth::password::hash_password;
use lmsvision_shared::db::migrations::{ensure_database_exists, run_migrations};
use lmsvision_shared::models::course::{Course, CreateCourse};
use lmsvision_shared::models::user::{CreateUser, User};
use serde_json::Value;
use sqlx::PgPool;
use std::path::PathBuf;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub uploads_dir: PathBuf,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let mut config = Config::from_env()?;

        // Every context gets its own uploads directory so file assertions
        // don't interfere across tests
        let uploads_dir =
            std::env::temp_dir().join(format!("lms-test-uploads-{}", Uuid::new_v4().simple()));
        config.uploads.dir = uploads_dir.clone();

        // Parallel contexts may race to create the database; the connect
        // below is the authoritative check.
        ensure_database_exists(&config.database.url).await.ok();

        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            uploads_dir,
        })
    }

    /// Sends a request and returns (status, parsed JSON body)
    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// POSTs a JSON body to `/api?<query>`
    pub async fn post_json(&self, query: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api?{}", query))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.call(request).await
    }

    /// POSTs a form-encoded body to `/api?<query>`
    pub async fn post_form(&self, query: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api?{}", query))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.call(request).await
    }

    /// GETs `/api?<query>`, optionally with a bearer session token
    pub async fn get(&self, query: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri(format!("/api?{}", query));

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        self.call(builder.body(Body::empty()).unwrap()).await
    }

    /// POSTs a multipart body to `/api?<query>`
    pub async fn post_multipart(
        &self,
        query: &str,
        boundary: &str,
        body: Vec<u8>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api?{}", query))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();

        self.call(request).await
    }

    /// Removes the context's uploads directory
    pub async fn cleanup(&self) {
        tokio::fs::remove_dir_all(&self.uploads_dir).await.ok();
    }
}

/// A unique email so parallel tests never collide
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}

/// Creates a user directly through the model layer
pub async fn create_user(ctx: &TestContext, password: &str) -> anyhow::Result<User> {
    let user = User::create(
        &ctx.db,
        CreateUser {
            username: "testuser".to_string(),
            email: unique_email("user"),
            password_hash: hash_password(password)?,
        },
    )
    .await?;

    Ok(user)
}

/// Creates a course directly through the model layer
pub async fn create_course(ctx: &TestContext, image: Option<String>) -> anyhow::Result<Course> {
    let course = Course::create(
        &ctx.db,
        CreateCourse {
            title: format!("Course {}", Uuid::new_v4().simple()),
            description: "A test course".to_string(),
            tags: "test".to_string(),
            image,
        },
    )
    .await?;

    Ok(course)
}

/// Counts enrollment rows for a (user, course) pair
pub async fn count_enrollments(
    db: &PgPool,
    user_id: i64,
    course_id: i64,
) -> anyhow::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM course_progress WHERE user_id = $1 AND course_id = $2",
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_one(db)
    .await?;

    Ok(count)
}

/// Builds a multipart body with text fields and an optional image part
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                boundary, name, value
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                boundary, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

/// Tiny PNG header, enough to look like file contents
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n0000";

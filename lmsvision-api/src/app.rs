/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use lmsvision_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = lmsvision_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use lmsvision_shared::auth::session::SessionStore;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Request bodies above this size are rejected outright. Slightly above the
/// 5 MiB image cap so an oversized-but-close upload still reaches the
/// validation that produces the proper error message.
const MAX_REQUEST_BYTES: usize = 6 * 1024 * 1024;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning; the session store is shared
/// across clones.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Session store binding tokens to logged-in users/admins
    pub sessions: SessionStore,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            sessions: SessionStore::new(),
        }
    }

    /// The content directory for uploaded images
    pub fn uploads_dir(&self) -> &Path {
        &self.config.uploads.dir
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health          # Health check (public)
/// ├── /api?action=...  # Action-routed operations (any method)
/// └── /uploads/*       # Static serving of the content directory
/// ```
///
/// Everything the backend does is behind `/api`; the `action` query
/// parameter selects the operation. CORS is permissive, matching the
/// wide-open policy of the frontend this serves.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let serve_uploads = ServeDir::new(state.config.uploads.dir.clone());

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api", any(routes::dispatch::dispatch))
        .nest_service("/uploads", serve_uploads)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}

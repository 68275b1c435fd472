//! # LMSVision API Server
//!
//! Learning-management backend exposing action-routed HTTP endpoints for
//! user registration/login, admin login, course management, and course
//! enrollment, backed by PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/lmsvision cargo run -p lmsvision-api
//! ```

use lmsvision_api::app::{build_router, AppState};
use lmsvision_api::config::Config;
use lmsvision_shared::auth::password;
use lmsvision_shared::db::{migrations, pool};
use lmsvision_shared::models::admin::Admin;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lmsvision_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "LMSVision API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    // A database that cannot be reached here is fatal; nothing is routed
    // until the pool, migrations, and seed have all succeeded.
    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;
    seed_admin(&db, &config).await?;

    let state = AppState::new(db, config);
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(state.config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight requests have drained; release the connections too.
    pool::close_pool(state.db.clone()).await;

    Ok(())
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        return;
    }

    tracing::info!("Shutdown signal received, draining connections");
}

/// Seeds the configured admin account if it doesn't exist yet
///
/// The password from the environment is hashed before storage; an existing
/// admin row is left untouched.
async fn seed_admin(db: &PgPool, config: &Config) -> anyhow::Result<()> {
    let Some(seed) = &config.admin_seed else {
        return Ok(());
    };

    let password_hash = password::hash_password(&seed.password)?;
    if Admin::seed(db, &seed.email, &password_hash).await? {
        tracing::info!(email = %seed.email, "Seeded admin account");
    }

    Ok(())
}

//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, service wiring, and Axum
//! server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgSetRepository, PgShareRepository, PgSharedContentReader, PgTokenRepository,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::share_code::ShareLinks;

use crate::application::services::{AuthService, CopyService, ResolveService, ShareService};
use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (plus the optional read-only pool for
///   shared-content loads)
/// - Applies migrations
/// - Redis cache (or NullCache fallback)
/// - Repository and service wiring
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config, &config.database_url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate");

    // Shared-content reads may use a separate, SELECT-only credential.
    // The reader trait has no write methods either way.
    let read_pool = match &config.read_database_url {
        Some(read_url) => {
            let pool = connect_pool(&config, read_url).await?;
            tracing::info!("Connected read-only database pool");
            pool
        }
        None => pool.clone(),
    };

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool_arc = Arc::new(pool);
    let read_pool_arc = Arc::new(read_pool);

    let share_repository = Arc::new(PgShareRepository::new(pool_arc.clone()));
    let set_repository = Arc::new(PgSetRepository::new(pool_arc.clone()));
    let content_reader = Arc::new(PgSharedContentReader::new(read_pool_arc));
    let token_repository = Arc::new(PgTokenRepository::new(pool_arc.clone()));

    let share_service = Arc::new(ShareService::new(
        share_repository.clone(),
        set_repository.clone(),
    ));
    let resolve_service = Arc::new(ResolveService::new(
        share_repository.clone(),
        content_reader.clone(),
        cache.clone(),
    ));
    let copy_service = Arc::new(CopyService::new(
        share_repository,
        content_reader,
        set_repository,
    ));
    let auth_service = Arc::new(AuthService::new(
        token_repository,
        config.token_signing_secret.clone(),
    ));

    let share_links = Arc::new(ShareLinks::new(
        &config.share_app_scheme,
        &config.share_app_host,
        &config.share_web_base,
    ));

    let state = AppState {
        share_service,
        resolve_service,
        copy_service,
        auth_service,
        cache,
        share_links,
        db: pool_arc,
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}

/// Builds a pool with the configured limits against the given URL.
async fn connect_pool(config: &Config, url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await?;

    Ok(pool)
}

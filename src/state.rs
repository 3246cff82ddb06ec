//! Shared application state injected into all HTTP handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, CopyService, ResolveService, ShareService};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgSetRepository, PgShareRepository, PgSharedContentReader, PgTokenRepository,
};
use crate::utils::share_code::ShareLinks;

/// Application state shared across handlers.
///
/// Services are wired against the concrete PostgreSQL repositories at
/// startup (see [`crate::server::run`]); handlers only see this struct.
#[derive(Clone)]
pub struct AppState {
    pub share_service: Arc<ShareService<PgShareRepository, PgSetRepository>>,
    pub resolve_service: Arc<ResolveService<PgShareRepository, PgSharedContentReader>>,
    pub copy_service: Arc<CopyService<PgShareRepository, PgSharedContentReader, PgSetRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub cache: Arc<dyn CacheService>,
    /// Share-link codec built from config; pure, safe to share.
    pub share_links: Arc<ShareLinks>,
    /// Primary pool handle kept for health checks.
    pub db: Arc<PgPool>,
}

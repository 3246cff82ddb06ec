//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis cache implementation for set projections.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: usize,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied to cached entries when
    ///   [`CacheService::set_projection`] is called with `ttl_seconds = None`;
    ///   controlled via `CACHE_TTL_SECONDS` env var
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds as usize,
            key_prefix: "set:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, set_id: i64) -> String {
        format!("{}{}", self.key_prefix, set_id)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_projection(&self, set_id: i64) -> CacheResult<Option<String>> {
        let key = self.build_key(set_id);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(projection)) => {
                debug!("Cache HIT: set {}", set_id);
                Ok(Some(projection))
            }
            Ok(None) => {
                debug!("Cache MISS: set {}", set_id);
                Ok(None)
            }
            Err(e) => {
                warn!("Redis GET error for set {}: {}", set_id, e);
                Ok(None)
            }
        }
    }

    async fn set_projection(
        &self,
        set_id: i64,
        projection: &str,
        ttl: Option<usize>,
    ) -> CacheResult<()> {
        let key = self.build_key(set_id);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.unwrap_or(self.default_ttl);

        match conn
            .set_ex::<_, _, ()>(&key, projection, ttl_seconds as u64)
            .await
        {
            Ok(_) => {
                debug!("Cache SET: set {} (TTL: {}s)", set_id, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for set {}: {}", set_id, e);
                Ok(())
            }
        }
    }

    async fn invalidate(&self, set_id: i64) -> CacheResult<()> {
        let key = self.build_key(set_id);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: set {}", set_id);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for set {}: {}", set_id, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

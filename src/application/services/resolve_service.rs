//! Public share resolution: code → read-only set projection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Share;
use crate::domain::repositories::{ShareRepository, SharedContentReader};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use serde_json::json;

/// Display name substituted when the author's profile is unavailable.
const ANONYMOUS_AUTHOR: &str = "Anonymous User";

/// One word pair in the public projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedWord {
    pub id: i64,
    pub word: String,
    pub translation: String,
    pub position: i32,
}

/// The public, owner-anonymized projection of a shared set.
///
/// This is the only shape in which shared content leaves the service:
/// header, ordered pairs, and a display name. No owner id, no other
/// sets, no other shares. It is also the unit stored in the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetProjection {
    pub set_id: i64,
    pub name: String,
    pub target_language: String,
    pub native_language: String,
    pub words: Vec<SharedWord>,
    pub author_name: String,
}

/// A successfully resolved share: gated share record plus projection.
///
/// `share.view_count` already includes the view being served.
#[derive(Debug)]
pub struct ResolvedShare {
    pub share: Share,
    pub projection: SetProjection,
}

/// Checks the hard gates every share-consuming path must pass, in order.
///
/// Missing ⇒ `NotFound`; revoked ⇒ `Gone`; expired ⇒ `Gone`. The two Gone
/// states carry distinct reasons but are equally terminal.
pub(crate) fn check_share_usable(
    share: Option<Share>,
    share_code: &str,
) -> Result<Share, AppError> {
    let Some(share) = share else {
        return Err(AppError::not_found(
            "Share not found",
            json!({ "share_code": share_code }),
        ));
    };

    if !share.is_active {
        return Err(AppError::gone(
            "This share link is no longer active",
            json!({ "reason": "revoked" }),
        ));
    }

    if share.is_expired() {
        return Err(AppError::gone(
            "This share link has expired",
            json!({ "reason": "expired" }),
        ));
    }

    Ok(share)
}

/// Service for the unauthenticated read path.
///
/// View counting is best-effort telemetry: a failed increment is logged
/// and the read still succeeds, reporting the last value read.
pub struct ResolveService<S: ShareRepository, R: SharedContentReader> {
    shares: Arc<S>,
    reader: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<S: ShareRepository, R: SharedContentReader> ResolveService<S, R> {
    /// Creates a new resolve service.
    pub fn new(shares: Arc<S>, reader: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            shares,
            reader,
            cache,
        }
    }

    /// Resolves a share code into the public projection of its set.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown code, or the underlying set is gone
    /// - [`AppError::Gone`] - share revoked or expired (terminal)
    /// - [`AppError::Internal`] - content load failure
    pub async fn resolve(&self, share_code: &str) -> Result<ResolvedShare, AppError> {
        let mut share = check_share_usable(self.shares.find_by_code(share_code).await?, share_code)?;

        match self.shares.increment_view_count(share_code).await {
            Ok(count) => share.view_count = count,
            Err(e) => {
                // Telemetry must not fail the read; the stale counter from
                // the lookup above is served instead.
                tracing::warn!("view count increment failed for {share_code}: {e}");
            }
        }
        metrics::counter!("share_views_total").increment(1);

        let projection = self.load_projection(share.set_id).await?;

        Ok(ResolvedShare { share, projection })
    }

    /// Loads the projection from cache, falling back to the content reader.
    async fn load_projection(&self, set_id: i64) -> Result<SetProjection, AppError> {
        if let Ok(Some(cached)) = self.cache.get_projection(set_id).await {
            match serde_json::from_str::<SetProjection>(&cached) {
                Ok(projection) => return Ok(projection),
                Err(e) => {
                    tracing::warn!("discarding undecodable cached projection for set {set_id}: {e}");
                }
            }
        }

        let set = self.reader.find_set(set_id).await?.ok_or_else(|| {
            AppError::not_found("Word set not found", json!({ "set_id": set_id }))
        })?;

        let words = self
            .reader
            .load_pairs(set_id)
            .await?
            .into_iter()
            .map(|pair| SharedWord {
                id: pair.id,
                word: pair.word,
                translation: pair.translation,
                position: pair.position,
            })
            .collect();

        let author_name = match self.reader.author_name(set.owner_id).await {
            Ok(Some(name)) => name,
            Ok(None) => ANONYMOUS_AUTHOR.to_string(),
            Err(e) => {
                tracing::warn!("author lookup failed for set {set_id}: {e}");
                ANONYMOUS_AUTHOR.to_string()
            }
        };

        let projection = SetProjection {
            set_id,
            name: set.name,
            target_language: set.target_language,
            native_language: set.native_language,
            words,
            author_name,
        };

        // Write-behind cache fill; the response does not wait for it.
        if let Ok(serialized) = serde_json::to_string(&projection) {
            let cache = self.cache.clone();
            tokio::spawn(async move {
                let _ = cache.set_projection(set_id, &serialized, None).await;
            });
        }

        Ok(projection)
    }
}

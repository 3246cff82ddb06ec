//! Share registry: idempotent get-or-create of share records.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::{NewShare, Share};
use crate::domain::repositories::{SetRepository, ShareInsert, ShareRepository};
use crate::error::AppError;
use crate::utils::share_code::generate_share_code;
use serde_json::json;

/// Result of a get-or-create call.
#[derive(Debug)]
pub struct ShareOutcome {
    pub share: Share,
    /// True only when this call created the record.
    pub is_new: bool,
}

/// Service owning the mapping from `(set, owner)` to a share record.
///
/// Creation is race-safe without check-then-insert: the insert relies on
/// the partial unique index over active shares, and a losing concurrent
/// caller re-reads the winner's row instead of erroring.
pub struct ShareService<S: ShareRepository, W: SetRepository> {
    shares: Arc<S>,
    sets: Arc<W>,
}

/// Attempts before giving up on share-code generation.
const MAX_CODE_ATTEMPTS: usize = 5;

impl<S: ShareRepository, W: SetRepository> ShareService<S, W> {
    /// Creates a new share service.
    pub fn new(shares: Arc<S>, sets: Arc<W>) -> Self {
        Self { shares, sets }
    }

    /// Returns the existing active share for `(set_id, owner_id)`, or
    /// creates one.
    ///
    /// # Idempotency
    ///
    /// Repeated calls return the same code and `created_at`; counters,
    /// expiry, and visibility of an existing share are never touched.
    /// Only the creating call reports `is_new = true`.
    ///
    /// # Arguments
    ///
    /// - `expires_in_days` - days until expiry; `None` means the share
    ///   never expires. `0` produces an already-expired share.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller does not own `set_id`.
    /// Returns [`AppError::Internal`] on persistence failure or when code
    /// generation keeps colliding; the whole call is safe to retry.
    pub async fn get_or_create(
        &self,
        set_id: i64,
        owner_id: i64,
        is_public: bool,
        expires_in_days: Option<i64>,
    ) -> Result<ShareOutcome, AppError> {
        // A set owned by someone else looks identical to a missing one.
        if self.sets.find_owned(set_id, owner_id).await?.is_none() {
            return Err(AppError::not_found(
                "Word set not found",
                json!({ "set_id": set_id }),
            ));
        }

        if let Some(existing) = self
            .shares
            .find_active_by_set_and_owner(set_id, owner_id)
            .await?
        {
            return Ok(ShareOutcome {
                share: existing,
                is_new: false,
            });
        }

        let expires_at = expires_in_days.map(|days| Utc::now() + Duration::days(days));

        for _ in 0..MAX_CODE_ATTEMPTS {
            let new_share = NewShare {
                set_id,
                owner_id,
                share_code: generate_share_code(),
                is_public,
                expires_at,
            };

            match self.shares.insert(new_share).await? {
                ShareInsert::Created(share) => {
                    metrics::counter!("share_links_created_total").increment(1);
                    return Ok(ShareOutcome {
                        share,
                        is_new: true,
                    });
                }
                ShareInsert::CodeCollision => {
                    tracing::debug!("share code collision, regenerating");
                    continue;
                }
                ShareInsert::LostRace => {
                    // A concurrent caller created the share between our
                    // lookup and insert; return their row.
                    if let Some(existing) = self
                        .shares
                        .find_active_by_set_and_owner(set_id, owner_id)
                        .await?
                    {
                        return Ok(ShareOutcome {
                            share: existing,
                            is_new: false,
                        });
                    }
                    // Winner vanished before we could read it; take
                    // another lap.
                    continue;
                }
            }
        }

        Err(AppError::internal(
            "Failed to generate unique share code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

//! DTOs for the generate-share-link endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShareOutcome;

/// Request to create (or fetch) a share link for an owned set.
///
/// `set_id` is required but modeled as `Option` so its absence maps to a
/// 400 with a named field rather than a body-level deserialization error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateShareLinkRequest {
    pub set_id: Option<i64>,

    /// Defaults to `true`.
    pub is_public: Option<bool>,

    /// Days until expiry; absent means the link never expires.
    #[validate(range(min = 0, max = 3650))]
    pub expires_in_days: Option<i64>,
}

/// Response carrying the durable share link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateShareLinkResponse {
    pub share_id: i64,
    pub share_code: String,
    /// App deep-link form of the share, e.g. `exquiziteapp://shared/<code>`.
    pub share_url: String,
    /// True only for the call that created the record.
    pub is_new: bool,
    pub view_count: i64,
    pub copy_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl GenerateShareLinkResponse {
    /// Builds the response from a service outcome and the encoded URL.
    pub fn from_outcome(outcome: ShareOutcome, share_url: String) -> Self {
        Self {
            share_id: outcome.share.id,
            share_code: outcome.share.share_code,
            share_url,
            is_new: outcome.is_new,
            view_count: outcome.share.view_count,
            copy_count: outcome.share.copy_count,
            created_at: outcome.share.created_at,
            expires_at: outcome.share.expires_at,
        }
    }
}

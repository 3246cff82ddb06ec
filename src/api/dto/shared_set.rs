//! DTOs for the get-shared-set endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::ResolvedShare;

/// Query parameters for the GET form: `?shareCode=<code>`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSharedSetQuery {
    pub share_code: Option<String>,
}

/// Body for the POST form: `{"shareCode": "<code>"}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSharedSetRequest {
    pub share_code: Option<String>,
}

/// One word pair in the public response, in display order.
#[derive(Debug, Serialize)]
pub struct SharedWordItem {
    pub id: i64,
    pub word: String,
    pub translation: String,
    pub position: i32,
}

/// Share metadata attached to the response.
///
/// Counters reflect the state *after* this view was counted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareInfo {
    pub share_code: String,
    pub view_count: i64,
    pub copy_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// The author as exposed publicly: a display name, nothing else.
#[derive(Debug, Serialize)]
pub struct Author {
    pub name: String,
}

/// Public projection of a shared set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedSetResponse {
    pub set_id: i64,
    pub name: String,
    pub target_language: String,
    pub native_language: String,
    pub word_count: usize,
    pub words: Vec<SharedWordItem>,
    pub share_info: ShareInfo,
    pub author: Author,
}

impl From<ResolvedShare> for SharedSetResponse {
    fn from(resolved: ResolvedShare) -> Self {
        let words: Vec<SharedWordItem> = resolved
            .projection
            .words
            .into_iter()
            .map(|w| SharedWordItem {
                id: w.id,
                word: w.word,
                translation: w.translation,
                position: w.position,
            })
            .collect();

        Self {
            set_id: resolved.projection.set_id,
            name: resolved.projection.name,
            target_language: resolved.projection.target_language,
            native_language: resolved.projection.native_language,
            word_count: words.len(),
            words,
            share_info: ShareInfo {
                share_code: resolved.share.share_code,
                view_count: resolved.share.view_count,
                copy_count: resolved.share.copy_count,
                created_at: resolved.share.created_at,
                expires_at: resolved.share.expires_at,
            },
            author: Author {
                name: resolved.projection.author_name,
            },
        }
    }
}

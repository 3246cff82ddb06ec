//! DTOs for the copy-shared-set endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CopySummary;

/// Request to copy a shared set into the caller's collection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CopySharedSetRequest {
    pub share_code: Option<String>,

    /// Name for the copy; blank or absent falls back to
    /// `"<source name> (Copy)"`.
    #[validate(length(max = 200))]
    pub custom_name: Option<String>,
}

/// Response for a completed copy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopySharedSetResponse {
    pub set_id: i64,
    pub name: String,
    pub word_count: usize,
    pub success: bool,
}

impl From<CopySummary> for CopySharedSetResponse {
    fn from(summary: CopySummary) -> Self {
        Self {
            set_id: summary.set_id,
            name: summary.name,
            word_count: summary.word_count,
            success: true,
        }
    }
}

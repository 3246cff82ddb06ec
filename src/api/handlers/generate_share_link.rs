//! Handler for the share-link creation endpoint.

use axum::{Extension, Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::share::{GenerateShareLinkRequest, GenerateShareLinkResponse};
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates or returns the share link for a set the caller owns.
///
/// # Endpoint
///
/// `POST /api/generate-share-link` (Bearer token required)
///
/// # Idempotency
///
/// Pressing "share" twice yields the same code: an existing active share is
/// returned unchanged with `isNew: false`; only the first call reports
/// `isNew: true`.
///
/// # Request Body
///
/// ```json
/// {
///   "setId": 10,
///   "isPublic": true,       // optional, default true
///   "expiresInDays": 7      // optional, absent = never expires
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shareId": 1,
///   "shareCode": "Ab3dEf6hIj9k",
///   "shareUrl": "exquiziteapp://shared/Ab3dEf6hIj9k",
///   "isNew": true,
///   "viewCount": 0,
///   "copyCount": 0,
///   "createdAt": "2025-06-10T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if `setId` is missing, 404 if the set is not owned by the
/// caller, 500 on persistence failure (safe to retry).
pub async fn generate_share_link_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<GenerateShareLinkRequest>,
) -> Result<Json<GenerateShareLinkResponse>, AppError> {
    payload.validate()?;

    let set_id = payload
        .set_id
        .ok_or_else(|| AppError::bad_request("setId is required", json!({})))?;

    let outcome = state
        .share_service
        .get_or_create(
            set_id,
            user_id,
            payload.is_public.unwrap_or(true),
            payload.expires_in_days,
        )
        .await?;

    let share_url = state.share_links.app_uri(&outcome.share.share_code);

    Ok(Json(GenerateShareLinkResponse::from_outcome(
        outcome, share_url,
    )))
}

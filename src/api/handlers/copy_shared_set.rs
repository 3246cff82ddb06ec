//! Handler for the shared-set duplication endpoint.

use axum::{Extension, Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::copy::{CopySharedSetRequest, CopySharedSetResponse};
use crate::api::middleware::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::share_code::is_valid_share_code;

/// Copies a shared set into the calling user's collection.
///
/// # Endpoint
///
/// `POST /api/copy-shared-set` (Bearer token required)
///
/// Not idempotent: each call creates an independent copy. Clients debounce
/// the button.
///
/// # Request Body
///
/// ```json
/// {
///   "shareCode": "Ab3dEf6hIj9k",
///   "customName": "My vocab"    // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "setId": 20, "name": "Travel basics (Copy)", "wordCount": 12, "success": true }
/// ```
///
/// # Errors
///
/// Returns 400 on a missing/malformed code or a self-copy attempt, 404 when
/// the share or its set is gone, 410 when the share was revoked or expired,
/// 500 on creation failure — with the half-created set already removed by
/// compensation.
pub async fn copy_shared_set_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<CopySharedSetRequest>,
) -> Result<Json<CopySharedSetResponse>, AppError> {
    payload.validate()?;

    let share_code = payload
        .share_code
        .ok_or_else(|| AppError::bad_request("shareCode is required", json!({})))?;

    if !is_valid_share_code(&share_code) {
        return Err(AppError::bad_request(
            "Invalid share code format",
            json!({ "share_code": share_code }),
        ));
    }

    let summary = state
        .copy_service
        .copy(&share_code, user_id, payload.custom_name)
        .await?;

    Ok(Json(CopySharedSetResponse::from(summary)))
}

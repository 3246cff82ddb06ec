//! Handler for the public share resolution endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::shared_set::{GetSharedSetQuery, GetSharedSetRequest, SharedSetResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::share_code::is_valid_share_code;

/// Resolves a share code into the public projection of its set.
///
/// # Endpoints
///
/// - `GET /api/get-shared-set?shareCode=<code>`
/// - `POST /api/get-shared-set` with `{"shareCode": "<code>"}`
///
/// No authentication: anyone holding a link can preview the set.
///
/// # Response
///
/// ```json
/// {
///   "setId": 10,
///   "name": "Travel basics",
///   "targetLanguage": "Spanish",
///   "nativeLanguage": "English",
///   "wordCount": 2,
///   "words": [{"id": 1, "word": "hola", "translation": "hello", "position": 0}],
///   "shareInfo": {"shareCode": "...", "viewCount": 6, "copyCount": 2, "createdAt": "..."},
///   "author": {"name": "Maria"}
/// }
/// ```
///
/// `viewCount` already includes the view being served.
///
/// # Errors
///
/// Returns 400 on a missing or malformed code, 404 when the code is
/// unknown, 410 when the share was revoked or has expired.
pub async fn get_shared_set_handler(
    State(state): State<AppState>,
    Query(query): Query<GetSharedSetQuery>,
) -> Result<Json<SharedSetResponse>, AppError> {
    resolve_share(&state, query.share_code).await
}

/// POST form of [`get_shared_set_handler`], for clients that prefer a body.
pub async fn get_shared_set_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<GetSharedSetRequest>,
) -> Result<Json<SharedSetResponse>, AppError> {
    resolve_share(&state, payload.share_code).await
}

/// Validates the code syntactically, then delegates to the resolve service.
async fn resolve_share(
    state: &AppState,
    share_code: Option<String>,
) -> Result<Json<SharedSetResponse>, AppError> {
    let share_code =
        share_code.ok_or_else(|| AppError::bad_request("shareCode is required", json!({})))?;

    if !is_valid_share_code(&share_code) {
        return Err(AppError::bad_request(
            "Invalid share code format",
            json!({ "share_code": share_code }),
        ));
    }

    let resolved = state.resolve_service.resolve(&share_code).await?;

    Ok(Json(SharedSetResponse::from(resolved)))
}

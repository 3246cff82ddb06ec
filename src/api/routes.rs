//! API route configuration.
//!
//! Routes are split into a public group and a group requiring Bearer token
//! authentication via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    copy_shared_set_handler, generate_share_link_handler, get_shared_set_handler,
    get_shared_set_post_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without authentication.
///
/// # Endpoints
///
/// - `GET  /get-shared-set` - Resolve a share code (query `shareCode`)
/// - `POST /get-shared-set` - Same, code in the JSON body
pub fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/get-shared-set",
        get(get_shared_set_handler).post(get_shared_set_post_handler),
    )
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /generate-share-link` - Idempotent share-link creation
/// - `POST /copy-shared-set`     - Duplicate a shared set into the caller's collection
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-share-link", post(generate_share_link_handler))
        .route("/copy-shared-set", post(copy_shared_set_handler))
}

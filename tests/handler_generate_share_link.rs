mod common;

use axum::{Extension, Router, middleware, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

use exquizite_share::api::handlers::generate_share_link_handler;
use exquizite_share::api::middleware::auth;
use exquizite_share::api::middleware::auth::AuthUser;

fn test_app(state: exquizite_share::AppState, user_id: i64) -> TestServer {
    let app = Router::new()
        .route("/api/generate-share-link", post(generate_share_link_handler))
        .layer(Extension(AuthUser(user_id)))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_generate_share_link_creates_share(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let server = test_app(common::create_test_state(pool), owner);

    let response = server
        .post("/api/generate-share-link")
        .json(&json!({ "setId": set_id }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    let code = body["shareCode"].as_str().unwrap();

    assert_eq!(code.len(), 12);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["isNew"], true);
    assert_eq!(body["viewCount"], 0);
    assert_eq!(body["copyCount"], 0);
    assert_eq!(
        body["shareUrl"],
        format!("exquiziteapp://shared/{}", code)
    );
    assert!(body.get("expiresAt").is_none());
}

#[sqlx::test]
async fn test_generate_share_link_is_idempotent(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let server = test_app(common::create_test_state(pool), owner);

    let first = server
        .post("/api/generate-share-link")
        .json(&json!({ "setId": set_id }))
        .await
        .json::<serde_json::Value>();

    let second = server
        .post("/api/generate-share-link")
        .json(&json!({ "setId": set_id, "expiresInDays": 30 }))
        .await
        .json::<serde_json::Value>();

    // Same durable code, same creation time; the later expiry request is
    // ignored for the existing share.
    assert_eq!(first["shareCode"], second["shareCode"]);
    assert_eq!(first["createdAt"], second["createdAt"]);
    assert_eq!(first["isNew"], true);
    assert_eq!(second["isNew"], false);
    assert!(second.get("expiresAt").is_none());
}

#[sqlx::test]
async fn test_generate_share_link_with_expiry(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let server = test_app(common::create_test_state(pool), owner);

    let response = server
        .post("/api/generate-share-link")
        .json(&json!({ "setId": set_id, "expiresInDays": 7 }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert!(body["expiresAt"].is_string());
}

#[sqlx::test]
async fn test_generate_share_link_missing_set_id(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;

    let server = test_app(common::create_test_state(pool), owner);

    let response = server
        .post("/api/generate-share-link")
        .json(&json!({}))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_generate_share_link_for_foreign_set_is_not_found(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let other = common::create_test_user(&pool, "Igor").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    // Authenticated as a user who does not own the set.
    let server = test_app(common::create_test_state(pool), other);

    let response = server
        .post("/api/generate-share-link")
        .json(&json!({ "setId": set_id }))
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_generate_share_link_requires_bearer_token(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;
    common::create_test_token(&pool, owner, "raw-test-token").await;

    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/api/generate-share-link", post(generate_share_link_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    // No Authorization header.
    let response = server
        .post("/api/generate-share-link")
        .json(&json!({ "setId": set_id }))
        .await;
    response.assert_status_unauthorized();

    // Valid token authenticates and resolves the owner.
    let response = server
        .post("/api/generate-share-link")
        .authorization_bearer("raw-test-token")
        .json(&json!({ "setId": set_id }))
        .await;
    response.assert_status_ok();

    // Unknown token is rejected.
    let response = server
        .post("/api/generate-share-link")
        .authorization_bearer("wrong-token")
        .json(&json!({ "setId": set_id }))
        .await;
    response.assert_status_unauthorized();
}

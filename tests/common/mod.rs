#![allow(dead_code)]

use hmac::{Hmac, Mac};
use sha2::Sha256;
use sqlx::PgPool;
use std::sync::Arc;

use exquizite_share::application::services::{
    AuthService, CopyService, ResolveService, ShareService,
};
use exquizite_share::infrastructure::cache::NullCache;
use exquizite_share::infrastructure::persistence::{
    PgSetRepository, PgShareRepository, PgSharedContentReader, PgTokenRepository,
};
use exquizite_share::state::AppState;
use exquizite_share::utils::share_code::ShareLinks;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

pub async fn create_test_user(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO profiles (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_set(pool: &PgPool, owner_id: i64, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO word_sets (owner_id, name, target_language, native_language) \
         VALUES ($1, $2, 'Spanish', 'English') RETURNING id",
    )
    .bind(owner_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_pairs(pool: &PgPool, set_id: i64, pairs: &[(&str, &str)]) {
    for (position, (word, translation)) in pairs.iter().enumerate() {
        sqlx::query(
            "INSERT INTO word_pairs (set_id, word, translation, position) VALUES ($1, $2, $3, $4)",
        )
        .bind(set_id)
        .bind(word)
        .bind(translation)
        .bind(position as i32)
        .execute(pool)
        .await
        .unwrap();
    }
}

pub async fn create_test_share(pool: &PgPool, set_id: i64, owner_id: i64, code: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO shared_sets (set_id, owner_id, share_code) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(set_id)
    .bind(owner_id)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_inactive_share(pool: &PgPool, set_id: i64, owner_id: i64, code: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO shared_sets (set_id, owner_id, share_code, is_active) \
         VALUES ($1, $2, $3, FALSE) RETURNING id",
    )
    .bind(set_id)
    .bind(owner_id)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_expired_share(pool: &PgPool, set_id: i64, owner_id: i64, code: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO shared_sets (set_id, owner_id, share_code, expires_at) \
         VALUES ($1, $2, $3, NOW() - INTERVAL '1 hour') RETURNING id",
    )
    .bind(set_id)
    .bind(owner_id)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Stores a token for `user_id` hashed the way the auth service hashes it.
pub async fn create_test_token(pool: &PgPool, user_id: i64, raw_token: &str) {
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_SIGNING_SECRET.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(raw_token.as_bytes());
    let token_hash = hex::encode(mac.finalize().into_bytes());

    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, 'test', $2)")
        .bind(user_id)
        .bind(&token_hash)
        .execute(pool)
        .await
        .unwrap();
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    let share_repo = Arc::new(PgShareRepository::new(pool.clone()));
    let set_repo = Arc::new(PgSetRepository::new(pool.clone()));
    let content_reader = Arc::new(PgSharedContentReader::new(pool.clone()));
    let token_repo = Arc::new(PgTokenRepository::new(pool.clone()));

    let cache = Arc::new(NullCache);

    let share_service = Arc::new(ShareService::new(share_repo.clone(), set_repo.clone()));
    let resolve_service = Arc::new(ResolveService::new(
        share_repo.clone(),
        content_reader.clone(),
        cache.clone(),
    ));
    let copy_service = Arc::new(CopyService::new(share_repo, content_reader, set_repo));
    let auth_service = Arc::new(AuthService::new(
        token_repo,
        TEST_SIGNING_SECRET.to_string(),
    ));

    AppState {
        share_service,
        resolve_service,
        copy_service,
        auth_service,
        cache,
        share_links: Arc::new(ShareLinks::new(
            "exquiziteapp",
            "shared",
            "https://exquizite-app.vercel.app/shared",
        )),
        db: pool,
    }
}

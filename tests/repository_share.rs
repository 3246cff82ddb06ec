mod common;

use sqlx::PgPool;
use std::sync::Arc;

use exquizite_share::domain::entities::{NewSetCopy, NewShare};
use exquizite_share::domain::repositories::{ShareInsert, ShareRepository};
use exquizite_share::infrastructure::persistence::PgShareRepository;

fn new_share(set_id: i64, owner_id: i64, code: &str) -> NewShare {
    NewShare {
        set_id,
        owner_id,
        share_code: code.to_string(),
        is_public: true,
        expires_at: None,
    }
}

#[sqlx::test]
async fn test_insert_and_find_by_code(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let repo = PgShareRepository::new(Arc::new(pool));

    let inserted = repo
        .insert(new_share(set_id, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    let ShareInsert::Created(share) = inserted else {
        panic!("expected Created, got {inserted:?}");
    };
    assert_eq!(share.share_code, "Ab3dEf6hIj9k");
    assert!(share.is_active);
    assert_eq!(share.view_count, 0);
    assert_eq!(share.copy_count, 0);

    let found = repo.find_by_code("Ab3dEf6hIj9k").await.unwrap().unwrap();
    assert_eq!(found.id, share.id);
    assert_eq!(found.set_id, set_id);
}

#[sqlx::test]
async fn test_insert_classifies_code_collision(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_a = common::create_test_set(&pool, owner, "Set A").await;
    let set_b = common::create_test_set(&pool, owner, "Set B").await;

    let repo = PgShareRepository::new(Arc::new(pool));

    repo.insert(new_share(set_a, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    // Same code for a different set: the share_code unique constraint fires.
    let result = repo
        .insert(new_share(set_b, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    assert!(matches!(result, ShareInsert::CodeCollision));
}

#[sqlx::test]
async fn test_insert_classifies_lost_race(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let repo = PgShareRepository::new(Arc::new(pool));

    repo.insert(new_share(set_id, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    // Different code for the same (set, owner): the partial unique index fires.
    let result = repo
        .insert(new_share(set_id, owner, "Zz9yXx8wVv7u"))
        .await
        .unwrap();

    assert!(matches!(result, ShareInsert::LostRace));
}

#[sqlx::test]
async fn test_deactivated_share_does_not_block_a_new_one(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let repo = PgShareRepository::new(Arc::new(pool));

    repo.insert(new_share(set_id, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();
    assert!(repo.deactivate("Ab3dEf6hIj9k").await.unwrap());

    // The partial index only covers active rows, so a fresh code mints fine.
    let result = repo
        .insert(new_share(set_id, owner, "Zz9yXx8wVv7u"))
        .await
        .unwrap();

    assert!(matches!(result, ShareInsert::Created(_)));
}

#[sqlx::test]
async fn test_find_active_excludes_deactivated(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let repo = PgShareRepository::new(Arc::new(pool));

    repo.insert(new_share(set_id, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    assert!(
        repo.find_active_by_set_and_owner(set_id, owner)
            .await
            .unwrap()
            .is_some()
    );

    repo.deactivate("Ab3dEf6hIj9k").await.unwrap();

    assert!(
        repo.find_active_by_set_and_owner(set_id, owner)
            .await
            .unwrap()
            .is_none()
    );

    // The row itself still exists for code lookups (resolution reports Gone).
    let share = repo.find_by_code("Ab3dEf6hIj9k").await.unwrap().unwrap();
    assert!(!share.is_active);
}

#[sqlx::test]
async fn test_deactivate_is_idempotent_on_result(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let repo = PgShareRepository::new(Arc::new(pool));

    repo.insert(new_share(set_id, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    assert!(repo.deactivate("Ab3dEf6hIj9k").await.unwrap());
    assert!(!repo.deactivate("Ab3dEf6hIj9k").await.unwrap());
    assert!(!repo.deactivate("NoSuchCode12").await.unwrap());
}

#[sqlx::test]
async fn test_concurrent_view_increments_are_not_lost(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let repo = Arc::new(PgShareRepository::new(Arc::new(pool)));

    repo.insert(new_share(set_id, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_view_count("Ab3dEf6hIj9k").await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let share = repo.find_by_code("Ab3dEf6hIj9k").await.unwrap().unwrap();
    assert_eq!(share.view_count, 10);
}

#[sqlx::test]
async fn test_increment_returns_post_increment_value(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let set_id = common::create_test_set(&pool, owner, "Travel basics").await;

    let repo = PgShareRepository::new(Arc::new(pool));

    repo.insert(new_share(set_id, owner, "Ab3dEf6hIj9k"))
        .await
        .unwrap();

    assert_eq!(repo.increment_view_count("Ab3dEf6hIj9k").await.unwrap(), 1);
    assert_eq!(repo.increment_view_count("Ab3dEf6hIj9k").await.unwrap(), 2);
    assert_eq!(repo.increment_copy_count("Ab3dEf6hIj9k").await.unwrap(), 1);
}

#[sqlx::test]
async fn test_increment_unknown_code_is_not_found(pool: PgPool) {
    let repo = PgShareRepository::new(Arc::new(pool));

    let result = repo.increment_view_count("NoSuchCode12").await;

    assert!(matches!(
        result.unwrap_err(),
        exquizite_share::AppError::NotFound { .. }
    ));
}

#[sqlx::test]
async fn test_record_copy_appends_provenance(pool: PgPool) {
    let owner = common::create_test_user(&pool, "Maria").await;
    let requester = common::create_test_user(&pool, "Igor").await;
    let original = common::create_test_set(&pool, owner, "Travel basics").await;
    let copied = common::create_test_set(&pool, requester, "Travel basics (Copy)").await;

    let repo = PgShareRepository::new(Arc::new(pool.clone()));

    repo.record_copy(NewSetCopy {
        original_set_id: original,
        copied_set_id: copied,
        copied_by: requester,
        shared_via_code: "Ab3dEf6hIj9k".to_string(),
    })
    .await
    .unwrap();

    let (copied_by, via_code): (i64, String) = sqlx::query_as(
        "SELECT copied_by, shared_via_code FROM set_copies WHERE original_set_id = $1",
    )
    .bind(original)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(copied_by, requester);
    assert_eq!(via_code, "Ab3dEf6hIj9k");
}

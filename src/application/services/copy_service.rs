//! Duplication of a shared set into a different owner's collection.

use std::sync::Arc;

use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::{NewSetCopy, NewWordPair, NewWordSet};
use crate::domain::repositories::{SetRepository, ShareRepository, SharedContentReader};
use crate::error::AppError;
use serde_json::json;

use super::resolve_service::check_share_usable;

/// Result of a successful copy.
#[derive(Debug)]
pub struct CopySummary {
    pub set_id: i64,
    pub name: String,
    pub word_count: usize,
}

/// Service for copying a shared set to the requesting user.
///
/// The copy spans two writes (set row, pair rows) that cannot share a
/// transaction because they may run under different access contexts. The
/// flow is a two-step saga: if the pair insert fails after the set was
/// created, the set is deleted again so no caller ever observes a
/// half-created empty set. The source is read through the elevated
/// read-only reader; every write runs as the requester.
///
/// Copying is intentionally *not* idempotent — each call produces an
/// independent set. Callers debounce at the UI layer.
pub struct CopyService<S: ShareRepository, R: SharedContentReader, W: SetRepository> {
    shares: Arc<S>,
    reader: Arc<R>,
    sets: Arc<W>,
}

impl<S: ShareRepository, R: SharedContentReader, W: SetRepository> CopyService<S, R, W> {
    /// Creates a new copy service.
    pub fn new(shares: Arc<S>, reader: Arc<R>, sets: Arc<W>) -> Self {
        Self {
            shares,
            reader,
            sets,
        }
    }

    /// Copies the set behind `share_code` into `requester_id`'s collection.
    ///
    /// The new set gets `custom_name` when provided and non-blank, else
    /// `"<source name> (Copy)"`. All pairs are copied with positions
    /// preserved. A copy is not a view: `view_count` is untouched.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown code or missing source set
    /// - [`AppError::Gone`] - share revoked or expired
    /// - [`AppError::Validation`] - requester already owns the source
    /// - [`AppError::Internal`] - creation failure; compensation has
    ///   already removed any partially created set
    pub async fn copy(
        &self,
        share_code: &str,
        requester_id: i64,
        custom_name: Option<String>,
    ) -> Result<CopySummary, AppError> {
        let share = check_share_usable(self.shares.find_by_code(share_code).await?, share_code)?;

        let source = self.reader.find_set(share.set_id).await?.ok_or_else(|| {
            AppError::not_found(
                "Original word set not found",
                json!({ "set_id": share.set_id }),
            )
        })?;

        if source.owner_id == requester_id {
            return Err(AppError::bad_request(
                "You already own this set",
                json!({ "set_id": source.id }),
            ));
        }

        let source_pairs = self.reader.load_pairs(source.id).await?;

        let name = custom_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| source.copy_name());

        let new_set = self
            .sets
            .create(NewWordSet {
                owner_id: requester_id,
                name,
                target_language: source.target_language.clone(),
                native_language: source.native_language.clone(),
                is_copy: true,
                original_author_id: Some(source.owner_id),
            })
            .await?;

        let new_pairs: Vec<NewWordPair> = source_pairs.iter().map(NewWordPair::from).collect();

        if let Err(e) = self.sets.insert_pairs(new_set.id, &new_pairs).await {
            tracing::error!(
                "pair copy into set {} failed, removing the empty set: {e}",
                new_set.id
            );
            self.compensate(new_set.id).await;
            return Err(e);
        }

        // From here on everything is advisory; the copy itself is complete.
        if let Err(e) = self
            .shares
            .record_copy(NewSetCopy {
                original_set_id: source.id,
                copied_set_id: new_set.id,
                copied_by: requester_id,
                shared_via_code: share_code.to_string(),
            })
            .await
        {
            tracing::warn!("copy provenance write failed for {share_code}: {e}");
        }

        if let Err(e) = self.shares.increment_copy_count(share_code).await {
            tracing::warn!("copy count increment failed for {share_code}: {e}");
        }

        metrics::counter!("share_copies_total").increment(1);

        Ok(CopySummary {
            set_id: new_set.id,
            name: new_set.name,
            word_count: new_pairs.len(),
        })
    }

    /// Removes the set created by a copy whose pair insert failed.
    ///
    /// The delete is retried with backoff. If it still fails, the empty
    /// set is leaked and logged; it is invisible to share invariants but
    /// needs operator cleanup.
    async fn compensate(&self, set_id: i64) {
        let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);

        let outcome = Retry::spawn(strategy, || self.sets.delete(set_id)).await;

        match outcome {
            Ok(_) => tracing::info!("compensated failed copy, set {set_id} removed"),
            Err(e) => tracing::error!("compensation failed, empty set {set_id} leaked: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Share, WordPair, WordSet};
    use crate::domain::repositories::{
        MockSetRepository, MockShareRepository, MockSharedContentReader,
    };
    use chrono::Utc;

    fn test_share(code: &str) -> Share {
        Share {
            id: 1,
            set_id: 10,
            owner_id: 42,
            share_code: code.to_string(),
            is_public: true,
            is_active: true,
            expires_at: None,
            view_count: 5,
            copy_count: 2,
            created_at: Utc::now(),
        }
    }

    fn test_source_set() -> WordSet {
        WordSet {
            id: 10,
            owner_id: 42,
            name: "Travel basics".to_string(),
            target_language: "Spanish".to_string(),
            native_language: "English".to_string(),
            is_copy: false,
            original_author_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn created_set(id: i64, owner_id: i64, new_set: &NewWordSet) -> WordSet {
        WordSet {
            id,
            owner_id,
            name: new_set.name.clone(),
            target_language: new_set.target_language.clone(),
            native_language: new_set.native_language.clone(),
            is_copy: new_set.is_copy,
            original_author_id: new_set.original_author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_pairs() -> Vec<WordPair> {
        vec![
            WordPair {
                id: 1,
                set_id: 10,
                word: "hola".to_string(),
                translation: "hello".to_string(),
                position: 0,
            },
            WordPair {
                id: 2,
                set_id: 10,
                word: "adios".to_string(),
                translation: "goodbye".to_string(),
                position: 1,
            },
        ]
    }

    #[tokio::test]
    async fn test_copy_success_preserves_pairs_and_positions() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        shares.expect_increment_view_count().times(0);

        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));
        reader
            .expect_load_pairs()
            .times(1)
            .returning(|_| Ok(test_pairs()));

        sets.expect_create()
            .withf(|new_set| {
                new_set.owner_id == 7
                    && new_set.name == "Travel basics (Copy)"
                    && new_set.target_language == "Spanish"
                    && new_set.is_copy
                    && new_set.original_author_id == Some(42)
            })
            .times(1)
            .returning(|new_set| Ok(created_set(20, 7, &new_set)));

        sets.expect_insert_pairs()
            .withf(|set_id, pairs| {
                *set_id == 20
                    && pairs.len() == 2
                    && pairs[0].word == "hola"
                    && pairs[0].position == 0
                    && pairs[1].position == 1
            })
            .times(1)
            .returning(|_, pairs| Ok(pairs.len() as u64));

        sets.expect_delete().times(0);

        shares
            .expect_record_copy()
            .withf(|copy| {
                copy.original_set_id == 10 && copy.copied_set_id == 20 && copy.copied_by == 7
            })
            .times(1)
            .returning(|_| Ok(()));
        shares
            .expect_increment_copy_count()
            .times(1)
            .returning(|_| Ok(3));

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let summary = service.copy("Ab3dEf6hIj9k", 7, None).await.unwrap();

        assert_eq!(summary.set_id, 20);
        assert_eq!(summary.name, "Travel basics (Copy)");
        assert_eq!(summary.word_count, 2);
    }

    #[tokio::test]
    async fn test_copy_uses_custom_name() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));
        reader
            .expect_load_pairs()
            .times(1)
            .returning(|_| Ok(test_pairs()));

        sets.expect_create()
            .withf(|new_set| new_set.name == "My vocab")
            .times(1)
            .returning(|new_set| Ok(created_set(20, 7, &new_set)));
        sets.expect_insert_pairs()
            .times(1)
            .returning(|_, pairs| Ok(pairs.len() as u64));

        shares.expect_record_copy().times(1).returning(|_| Ok(()));
        shares
            .expect_increment_copy_count()
            .times(1)
            .returning(|_| Ok(3));

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let summary = service
            .copy("Ab3dEf6hIj9k", 7, Some("My vocab".to_string()))
            .await
            .unwrap();

        assert_eq!(summary.name, "My vocab");
    }

    #[tokio::test]
    async fn test_copy_blank_custom_name_falls_back_to_default() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));
        reader
            .expect_load_pairs()
            .times(1)
            .returning(|_| Ok(test_pairs()));

        sets.expect_create()
            .withf(|new_set| new_set.name == "Travel basics (Copy)")
            .times(1)
            .returning(|new_set| Ok(created_set(20, 7, &new_set)));
        sets.expect_insert_pairs()
            .times(1)
            .returning(|_, pairs| Ok(pairs.len() as u64));

        shares.expect_record_copy().times(1).returning(|_| Ok(()));
        shares
            .expect_increment_copy_count()
            .times(1)
            .returning(|_| Ok(3));

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let summary = service
            .copy("Ab3dEf6hIj9k", 7, Some("   ".to_string()))
            .await
            .unwrap();

        assert_eq!(summary.name, "Travel basics (Copy)");
    }

    #[tokio::test]
    async fn test_self_copy_rejected_and_nothing_created() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));

        reader.expect_load_pairs().times(0);
        sets.expect_create().times(0);
        sets.expect_insert_pairs().times(0);

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        // Requester 42 owns the source set.
        let result = service.copy("Ab3dEf6hIj9k", 42, None).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_copy_of_gone_share_creates_nothing() {
        let mut shares = MockShareRepository::new();
        let reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares.expect_find_by_code().times(1).returning(|code| {
            let mut share = test_share(code);
            share.is_active = false;
            Ok(Some(share))
        });

        sets.expect_create().times(0);

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let result = service.copy("RevokedCode1", 7, None).await;

        assert!(matches!(result.unwrap_err(), AppError::Gone { .. }));
    }

    #[tokio::test]
    async fn test_failed_pair_insert_triggers_compensation() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));
        reader
            .expect_load_pairs()
            .times(1)
            .returning(|_| Ok(test_pairs()));

        sets.expect_create()
            .times(1)
            .returning(|new_set| Ok(created_set(20, 7, &new_set)));

        sets.expect_insert_pairs()
            .times(1)
            .returning(|_, _| Err(AppError::internal("insert failed", json!({}))));

        // Compensation removes the half-created set.
        sets.expect_delete()
            .withf(|set_id| *set_id == 20)
            .times(1)
            .returning(|_| Ok(true));

        // No provenance, no counter after a failed copy.
        shares.expect_record_copy().times(0);
        shares.expect_increment_copy_count().times(0);

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let result = service.copy("Ab3dEf6hIj9k", 7, None).await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_compensation_delete_is_retried() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));
        reader
            .expect_load_pairs()
            .times(1)
            .returning(|_| Ok(test_pairs()));

        sets.expect_create()
            .times(1)
            .returning(|new_set| Ok(created_set(20, 7, &new_set)));
        sets.expect_insert_pairs()
            .times(1)
            .returning(|_, _| Err(AppError::internal("insert failed", json!({}))));

        let mut delete_calls = 0;
        sets.expect_delete().times(2).returning(move |_| {
            delete_calls += 1;
            if delete_calls == 1 {
                Err(AppError::internal("transient", json!({})))
            } else {
                Ok(true)
            }
        });

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let result = service.copy("Ab3dEf6hIj9k", 7, None).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_provenance_and_counter_failures_do_not_fail_the_copy() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));
        reader
            .expect_load_pairs()
            .times(1)
            .returning(|_| Ok(test_pairs()));

        sets.expect_create()
            .times(1)
            .returning(|new_set| Ok(created_set(20, 7, &new_set)));
        sets.expect_insert_pairs()
            .times(1)
            .returning(|_, pairs| Ok(pairs.len() as u64));
        sets.expect_delete().times(0);

        shares
            .expect_record_copy()
            .times(1)
            .returning(|_| Err(AppError::internal("audit down", json!({}))));
        shares
            .expect_increment_copy_count()
            .times(1)
            .returning(|_| Err(AppError::internal("counter down", json!({}))));

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let summary = service.copy("Ab3dEf6hIj9k", 7, None).await.unwrap();

        assert_eq!(summary.word_count, 2);
    }

    #[tokio::test]
    async fn test_copy_with_empty_source_copies_zero_pairs() {
        let mut shares = MockShareRepository::new();
        let mut reader = MockSharedContentReader::new();
        let mut sets = MockSetRepository::new();

        shares
            .expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(test_share(code))));
        reader
            .expect_find_set()
            .times(1)
            .returning(|_| Ok(Some(test_source_set())));
        reader.expect_load_pairs().times(1).returning(|_| Ok(vec![]));

        sets.expect_create()
            .times(1)
            .returning(|new_set| Ok(created_set(20, 7, &new_set)));
        sets.expect_insert_pairs()
            .withf(|_, pairs| pairs.is_empty())
            .times(1)
            .returning(|_, _| Ok(0));

        shares.expect_record_copy().times(1).returning(|_| Ok(()));
        shares
            .expect_increment_copy_count()
            .times(1)
            .returning(|_| Ok(3));

        let service = CopyService::new(Arc::new(shares), Arc::new(reader), Arc::new(sets));

        let summary = service.copy("Ab3dEf6hIj9k", 7, None).await.unwrap();

        assert_eq!(summary.word_count, 0);
    }
}

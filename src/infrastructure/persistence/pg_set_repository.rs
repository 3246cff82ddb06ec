//! PostgreSQL implementation of the word-set repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

use crate::domain::entities::{NewWordPair, NewWordSet, WordSet};
use crate::domain::repositories::SetRepository;
use crate::error::AppError;

/// PostgreSQL repository for word-set creation and removal.
///
/// Runs in the requesting user's context; every query is scoped by explicit
/// ids, never by implicit session state.
pub struct PgSetRepository {
    pool: Arc<PgPool>,
}

impl PgSetRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

pub(crate) fn map_word_set(row: &PgRow) -> Result<WordSet, sqlx::Error> {
    Ok(WordSet {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        target_language: row.try_get("target_language")?,
        native_language: row.try_get("native_language")?,
        is_copy: row.try_get("is_copy")?,
        original_author_id: row.try_get("original_author_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) const WORD_SET_COLUMNS: &str =
    "id, owner_id, name, target_language, native_language, is_copy, \
     original_author_id, created_at, updated_at";

#[async_trait]
impl SetRepository for PgSetRepository {
    async fn find_owned(&self, set_id: i64, owner_id: i64) -> Result<Option<WordSet>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {WORD_SET_COLUMNS} FROM word_sets WHERE id = $1 AND owner_id = $2"
        ))
        .bind(set_id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref()
            .map(map_word_set)
            .transpose()
            .map_err(Into::into)
    }

    async fn create(&self, new_set: NewWordSet) -> Result<WordSet, AppError> {
        let row = sqlx::query(&format!(
            "INSERT INTO word_sets \
             (owner_id, name, target_language, native_language, is_copy, original_author_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {WORD_SET_COLUMNS}"
        ))
        .bind(new_set.owner_id)
        .bind(&new_set.name)
        .bind(&new_set.target_language)
        .bind(&new_set.native_language)
        .bind(new_set.is_copy)
        .bind(new_set.original_author_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        map_word_set(&row).map_err(Into::into)
    }

    async fn insert_pairs(&self, set_id: i64, pairs: &[NewWordPair]) -> Result<u64, AppError> {
        if pairs.is_empty() {
            return Ok(0);
        }

        let words: Vec<String> = pairs.iter().map(|p| p.word.clone()).collect();
        let translations: Vec<String> = pairs.iter().map(|p| p.translation.clone()).collect();
        let positions: Vec<i32> = pairs.iter().map(|p| p.position).collect();

        // Single statement: either every pair lands or none do.
        let result = sqlx::query(
            "INSERT INTO word_pairs (set_id, word, translation, position) \
             SELECT $1, word, translation, position \
             FROM UNNEST($2::text[], $3::text[], $4::int[]) AS t(word, translation, position)",
        )
        .bind(set_id)
        .bind(&words)
        .bind(&translations)
        .bind(&positions)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, set_id: i64) -> Result<bool, AppError> {
        // Word pairs go with the set via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM word_sets WHERE id = $1")
            .bind(set_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

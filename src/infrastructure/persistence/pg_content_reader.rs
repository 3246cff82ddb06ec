//! PostgreSQL implementation of the elevated shared-content reader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use super::pg_set_repository::{WORD_SET_COLUMNS, map_word_set};
use crate::domain::entities::{WordPair, WordSet};
use crate::domain::repositories::SharedContentReader;
use crate::error::AppError;

/// PostgreSQL reader for content that a validated share has proven public.
///
/// Deployments that enforce per-owner row restrictions hand this repository
/// a pool connected with a read-only credential (`READ_DATABASE_URL`); the
/// trait it implements has no write methods, so that credential can never
/// mutate data even by accident.
pub struct PgSharedContentReader {
    pool: Arc<PgPool>,
}

impl PgSharedContentReader {
    /// Creates a new reader on the given (ideally read-only) pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SharedContentReader for PgSharedContentReader {
    async fn find_set(&self, set_id: i64) -> Result<Option<WordSet>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {WORD_SET_COLUMNS} FROM word_sets WHERE id = $1"
        ))
        .bind(set_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref()
            .map(map_word_set)
            .transpose()
            .map_err(Into::into)
    }

    async fn load_pairs(&self, set_id: i64) -> Result<Vec<WordPair>, AppError> {
        let rows = sqlx::query(
            "SELECT id, set_id, word, translation, position \
             FROM word_pairs \
             WHERE set_id = $1 \
             ORDER BY position ASC",
        )
        .bind(set_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(WordPair {
                    id: row.try_get("id")?,
                    set_id: row.try_get("set_id")?,
                    word: row.try_get("word")?,
                    translation: row.try_get("translation")?,
                    position: row.try_get("position")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    async fn author_name(&self, user_id: i64) -> Result<Option<String>, AppError> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(name)
    }
}

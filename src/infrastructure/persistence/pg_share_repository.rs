//! PostgreSQL implementation of the share repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

use crate::domain::entities::{NewSetCopy, NewShare, Share};
use crate::domain::repositories::{ShareInsert, ShareRepository};
use crate::error::AppError;
use crate::utils::db_error::{is_active_share_conflict, is_share_code_collision};
use serde_json::json;

/// PostgreSQL repository for share records, counters, and copy provenance.
///
/// Counter updates are single `count = count + 1` statements so concurrent
/// increments never lose updates.
pub struct PgShareRepository {
    pool: Arc<PgPool>,
}

impl PgShareRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_share(row: &PgRow) -> Result<Share, sqlx::Error> {
    Ok(Share {
        id: row.try_get("id")?,
        set_id: row.try_get("set_id")?,
        owner_id: row.try_get("owner_id")?,
        share_code: row.try_get("share_code")?,
        is_public: row.try_get("is_public")?,
        is_active: row.try_get("is_active")?,
        expires_at: row.try_get("expires_at")?,
        view_count: row.try_get("view_count")?,
        copy_count: row.try_get("copy_count")?,
        created_at: row.try_get("created_at")?,
    })
}

const SHARE_COLUMNS: &str = "id, set_id, owner_id, share_code, is_public, is_active, \
                             expires_at, view_count, copy_count, created_at";

#[async_trait]
impl ShareRepository for PgShareRepository {
    async fn find_active_by_set_and_owner(
        &self,
        set_id: i64,
        owner_id: i64,
    ) -> Result<Option<Share>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {SHARE_COLUMNS} FROM shared_sets \
             WHERE set_id = $1 AND owner_id = $2 AND is_active"
        ))
        .bind(set_id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_share).transpose().map_err(Into::into)
    }

    async fn find_by_code(&self, share_code: &str) -> Result<Option<Share>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {SHARE_COLUMNS} FROM shared_sets WHERE share_code = $1"
        ))
        .bind(share_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.as_ref().map(map_share).transpose().map_err(Into::into)
    }

    async fn insert(&self, new_share: NewShare) -> Result<ShareInsert, AppError> {
        let result = sqlx::query(&format!(
            "INSERT INTO shared_sets (set_id, owner_id, share_code, is_public, expires_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SHARE_COLUMNS}"
        ))
        .bind(new_share.set_id)
        .bind(new_share.owner_id)
        .bind(&new_share.share_code)
        .bind(new_share.is_public)
        .bind(new_share.expires_at)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(ShareInsert::Created(map_share(&row)?)),
            Err(e) if is_share_code_collision(&e) => Ok(ShareInsert::CodeCollision),
            Err(e) if is_active_share_conflict(&e) => Ok(ShareInsert::LostRace),
            Err(e) => Err(e.into()),
        }
    }

    async fn increment_view_count(&self, share_code: &str) -> Result<i64, AppError> {
        let count: Option<i64> = sqlx::query_scalar(
            "UPDATE shared_sets SET view_count = view_count + 1 \
             WHERE share_code = $1 \
             RETURNING view_count",
        )
        .bind(share_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        count.ok_or_else(|| {
            AppError::not_found("Share not found", json!({ "share_code": share_code }))
        })
    }

    async fn increment_copy_count(&self, share_code: &str) -> Result<i64, AppError> {
        let count: Option<i64> = sqlx::query_scalar(
            "UPDATE shared_sets SET copy_count = copy_count + 1 \
             WHERE share_code = $1 \
             RETURNING copy_count",
        )
        .bind(share_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        count.ok_or_else(|| {
            AppError::not_found("Share not found", json!({ "share_code": share_code }))
        })
    }

    async fn record_copy(&self, new_copy: NewSetCopy) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO set_copies (original_set_id, copied_set_id, copied_by, shared_via_code) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(new_copy.original_set_id)
        .bind(new_copy.copied_set_id)
        .bind(new_copy.copied_by)
        .bind(&new_copy.shared_via_code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn deactivate(&self, share_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE shared_sets SET is_active = FALSE \
             WHERE share_code = $1 AND is_active",
        )
        .bind(share_code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

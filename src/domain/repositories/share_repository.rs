//! Repository trait for share records and copy provenance.

use crate::domain::entities::{NewSetCopy, NewShare, Share};
use crate::error::AppError;
use async_trait::async_trait;

/// Outcome of attempting to insert a new share record.
///
/// Share creation relies on database constraints rather than check-then-insert,
/// so the insert itself reports which constraint fired.
#[derive(Debug)]
pub enum ShareInsert {
    /// The row was inserted.
    Created(Share),
    /// The generated share code collided with an existing one; the caller
    /// should regenerate and retry.
    CodeCollision,
    /// A concurrent caller already created the active share for this
    /// `(set_id, owner_id)`; the caller should re-read the winner's row.
    LostRace,
}

/// Repository interface for share records.
///
/// Counter increments are single SQL statements executed at the storage
/// layer, never read-modify-write in the service.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShareRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_share.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareRepository: Send + Sync {
    /// Finds the active share record for a set and owner.
    ///
    /// Deactivated shares are not returned; a later get-or-create mints a
    /// fresh code instead of resurrecting an old one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_set_and_owner(
        &self,
        set_id: i64,
        owner_id: i64,
    ) -> Result<Option<Share>, AppError>;

    /// Finds a share record by its code, regardless of state.
    ///
    /// State gating (active, expired) is the caller's responsibility so that
    /// revoked and expired shares can be distinguished from missing ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, share_code: &str) -> Result<Option<Share>, AppError>;

    /// Inserts a new share record.
    ///
    /// Unique-constraint violations are classified into [`ShareInsert`]
    /// variants instead of surfacing as errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on other database errors.
    async fn insert(&self, new_share: NewShare) -> Result<ShareInsert, AppError>;

    /// Atomically increments the view counter, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_view_count(&self, share_code: &str) -> Result<i64, AppError>;

    /// Atomically increments the copy counter, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_copy_count(&self, share_code: &str) -> Result<i64, AppError>;

    /// Appends a copy provenance record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_copy(&self, new_copy: NewSetCopy) -> Result<(), AppError>;

    /// Deactivates a share, making its code permanently unresolvable.
    ///
    /// Returns `Ok(true)` if the share was found and active, `Ok(false)`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn deactivate(&self, share_code: &str) -> Result<bool, AppError>;
}

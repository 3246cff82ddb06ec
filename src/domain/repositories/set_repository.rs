//! Repository trait for word-set writes in the requester's context.

use crate::domain::entities::{NewWordPair, NewWordSet, WordSet};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for creating and removing word sets.
///
/// All operations run in the calling user's context. Reads of *shared*
/// content go through [`super::SharedContentReader`] instead, which carries
/// the elevated read-only credential.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSetRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SetRepository: Send + Sync {
    /// Finds a set by id, constrained to the given owner.
    ///
    /// Used to confirm the caller owns a set before sharing it; a set owned
    /// by someone else is indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_owned(&self, set_id: i64, owner_id: i64) -> Result<Option<WordSet>, AppError>;

    /// Creates a new word set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_set: NewWordSet) -> Result<WordSet, AppError>;

    /// Bulk-inserts word pairs under a set, preserving the given positions.
    ///
    /// Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including position
    /// uniqueness violations.
    async fn insert_pairs(&self, set_id: i64, pairs: &[NewWordPair]) -> Result<u64, AppError>;

    /// Deletes a set and, via cascade, its word pairs.
    ///
    /// Returns `Ok(true)` if a row was deleted. Used by the duplication
    /// compensation path to remove a half-created aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, set_id: i64) -> Result<bool, AppError>;
}

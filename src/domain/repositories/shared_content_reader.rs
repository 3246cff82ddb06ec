//! Read-only access to content that a validated share has proven public.

use crate::domain::entities::{WordPair, WordSet};
use crate::error::AppError;
use async_trait::async_trait;

/// Elevated read-only view of shared content.
///
/// The production implementation may run on a separate read-only database
/// credential that bypasses per-owner row restrictions. That is safe only
/// because every caller first passes the share gates (exists, active, not
/// expired); this trait deliberately has no write methods so the elevated
/// credential can never be used to mutate anything.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSharedContentReader`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SharedContentReader: Send + Sync {
    /// Loads a set header by id, regardless of owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_set(&self, set_id: i64) -> Result<Option<WordSet>, AppError>;

    /// Loads all word pairs of a set, ordered by `position` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn load_pairs(&self, set_id: i64) -> Result<Vec<WordPair>, AppError>;

    /// Looks up a user's public display name.
    ///
    /// `Ok(None)` when the profile is missing; callers substitute a
    /// placeholder rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn author_name(&self, user_id: i64) -> Result<Option<String>, AppError>;
}

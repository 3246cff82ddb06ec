//! Helpers for classifying database constraint violations.

/// True when `e` is a unique violation on the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(c) if c == constraint)
}

/// Unique violation on the share-code column: the generated code collided
/// with an existing one and generation should be retried.
pub fn is_share_code_collision(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, "shared_sets_share_code_key")
}

/// Unique violation on the partial `(set_id, owner_id) WHERE is_active`
/// index: a concurrent caller already created the share, re-read instead.
pub fn is_active_share_conflict(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, "shared_sets_set_owner_active_key")
}

//! Copy provenance: an immutable record linking a duplicate to its source.

use chrono::{DateTime, Utc};

/// An append-only audit entry created when a shared set is copied.
///
/// Provenance is advisory. It is never consulted for correctness and never
/// mutated after creation.
#[derive(Debug, Clone)]
pub struct SetCopy {
    pub id: i64,
    pub original_set_id: i64,
    pub copied_set_id: i64,
    pub copied_by: i64,
    pub shared_via_code: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a copy.
#[derive(Debug, Clone)]
pub struct NewSetCopy {
    pub original_set_id: i64,
    pub copied_set_id: i64,
    pub copied_by: i64,
    pub shared_via_code: String,
}

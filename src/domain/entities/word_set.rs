//! Word set aggregate: an owned collection of ordered word pairs.

use chrono::{DateTime, Utc};

/// An owned word set with its language pair and copy provenance flags.
///
/// The set is the unit of sharing and duplication. Ownership never
/// transfers; duplication creates a new set under a new owner.
#[derive(Debug, Clone)]
pub struct WordSet {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub target_language: String,
    pub native_language: String,
    pub is_copy: bool,
    /// Owner of the set this one was copied from, when `is_copy` is set.
    pub original_author_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WordSet {
    /// Default name given to a duplicate when the caller supplies none.
    pub fn copy_name(&self) -> String {
        format!("{} (Copy)", self.name)
    }
}

/// Input data for creating a new word set.
#[derive(Debug, Clone)]
pub struct NewWordSet {
    pub owner_id: i64,
    pub name: String,
    pub target_language: String,
    pub native_language: String,
    pub is_copy: bool,
    pub original_author_id: Option<i64>,
}

/// A single word/translation pair within a set.
///
/// `position` is 0-based and dense within a set; it defines display order.
#[derive(Debug, Clone)]
pub struct WordPair {
    pub id: i64,
    pub set_id: i64,
    pub word: String,
    pub translation: String,
    pub position: i32,
}

/// Input data for inserting a word pair under a set.
#[derive(Debug, Clone)]
pub struct NewWordPair {
    pub word: String,
    pub translation: String,
    pub position: i32,
}

impl From<&WordPair> for NewWordPair {
    /// Prepares a pair for insertion under a different set, preserving its
    /// content and position.
    fn from(pair: &WordPair) -> Self {
        Self {
            word: pair.word.clone(),
            translation: pair.translation.clone(),
            position: pair.position,
        }
    }
}

//! Share record: a public, revocable pointer to one word set.

use chrono::{DateTime, Utc};

/// A share record for a word set.
///
/// The `share_code` is the only identifier ever exposed publicly. Counters
/// only grow; deactivation and expiry are terminal states for the code.
#[derive(Debug, Clone)]
pub struct Share {
    pub id: i64,
    pub set_id: i64,
    pub owner_id: i64,
    pub share_code: String,
    pub is_public: bool,
    pub is_active: bool,
    /// `None` means the share does not expire.
    pub expires_at: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub copy_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// Returns true if the share has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new share record.
#[derive(Debug, Clone)]
pub struct NewShare {
    pub set_id: i64,
    pub owner_id: i64,
    pub share_code: String,
    pub is_public: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_share(expires_at: Option<DateTime<Utc>>) -> Share {
        Share {
            id: 1,
            set_id: 10,
            owner_id: 42,
            share_code: "Ab3dEf6hIj9k".to_string(),
            is_public: true,
            is_active: true,
            expires_at,
            view_count: 0,
            copy_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_share_without_expiry_never_expires() {
        assert!(!test_share(None).is_expired());
    }

    #[test]
    fn test_share_is_expired() {
        let share = test_share(Some(Utc::now() - Duration::seconds(1)));
        assert!(share.is_expired());
    }

    #[test]
    fn test_share_with_future_expiry_is_not_expired() {
        let share = test_share(Some(Utc::now() + Duration::days(7)));
        assert!(!share.is_expired());
    }
}

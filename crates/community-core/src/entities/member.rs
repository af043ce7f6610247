//! Member entity - a community participant

use chrono::{DateTime, Utc};

use crate::value_objects::MemberId;

/// Community member
///
/// `streak_count` is a cached copy of the value derived from attendance
/// history. It is written only by the streak update path and can always be
/// recomputed from source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub email: String,
    pub streak_count: u32,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new non-admin member with no streak
    pub fn new(id: MemberId, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            streak_count: 0,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the cached streak count
    pub fn set_streak_count(&mut self, count: u32) {
        if self.streak_count != count {
            self.streak_count = count;
            self.updated_at = Utc::now();
        }
    }
}

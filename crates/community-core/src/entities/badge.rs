//! Badge entities - milestone definitions and their grants

use chrono::{DateTime, Utc};

use crate::value_objects::{BadgeId, MemberBadgeId, MemberId};

/// Badge definition; `name` is globally unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub icon: String,
    pub criteria: String,
}

impl Badge {
    /// Create a new badge definition
    pub fn new(name: impl Into<String>, icon: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self {
            id: BadgeId::new_v4(),
            name: name.into(),
            icon: icon.into(),
            criteria: criteria.into(),
        }
    }
}

/// Grant record, unique per (member, badge)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBadge {
    pub id: MemberBadgeId,
    pub member_id: MemberId,
    pub badge_id: BadgeId,
    pub awarded_at: DateTime<Utc>,
}

impl MemberBadge {
    /// Create a grant awarded now
    pub fn new(member_id: MemberId, badge_id: BadgeId) -> Self {
        Self {
            id: MemberBadgeId::new_v4(),
            member_id,
            badge_id,
            awarded_at: Utc::now(),
        }
    }
}

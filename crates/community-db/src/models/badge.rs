//! Badge and grant database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for badges table
#[derive(Debug, Clone, FromRow)]
pub struct BadgeModel {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub criteria: String,
}

/// Database model for member_badges table
#[derive(Debug, Clone, FromRow)]
pub struct MemberBadgeModel {
    pub id: Uuid,
    pub member_id: Uuid,
    pub badge_id: Uuid,
    pub awarded_at: DateTime<Utc>,
}

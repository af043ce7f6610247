//! Attendance database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for attendances table
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub member_id: Uuid,
    pub event_external_id: String,
    pub status: String,
    pub checked_in_at: Option<DateTime<Utc>>,
}

//! Event entity - a scheduled community gathering

use chrono::{DateTime, Utc};

use crate::value_objects::EventId;

/// Scheduled event synced from the external calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    /// Calendar identifier; attendance records point at this, not at `id`
    pub external_id: String,
    pub starts_at: DateTime<Utc>,
    pub canceled: bool,
}

impl Event {
    /// Create a new, non-canceled event
    pub fn new(external_id: impl Into<String>, starts_at: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new_v4(),
            external_id: external_id.into(),
            starts_at,
            canceled: false,
        }
    }

    /// True once the start timestamp is at or before `now`
    #[inline]
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }
}

//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use community_core::{Event, Member, MemberId};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A member with a unique email
pub fn unique_member() -> Member {
    Member::new(
        MemberId::new_v4(),
        format!("member{}@example.com", unique_suffix()),
    )
}

/// Weekly events ending just before `now`
///
/// Index 0 is the most recent event, so `external_ids()[..k]` are the
/// latest `k` events.
#[derive(Debug, Clone)]
pub struct WeeklySchedule {
    pub events: Vec<Event>,
}

impl WeeklySchedule {
    /// `count` started events named `{prefix}-1` (latest) to
    /// `{prefix}-{count}` (oldest)
    pub fn started(prefix: &str, count: usize, now: DateTime<Utc>) -> Self {
        let events = (0..count)
            .map(|i| {
                let starts_at = now - Duration::weeks(i as i64) - Duration::minutes(30);
                Event::new(format!("{prefix}-{}", i + 1), starts_at)
            })
            .collect();
        Self { events }
    }

    /// Calendar ids, most recent first
    pub fn external_ids(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.external_id.as_str()).collect()
    }

    /// Calendar id of the `n`th most recent event (0 = latest)
    pub fn id(&self, n: usize) -> &str {
        &self.events[n].external_id
    }
}

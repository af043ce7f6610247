//! Consecutive-attendance streak calculation

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::entities::{Attendance, Event};

/// Knobs for the streak walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakPolicy {
    /// Step over canceled events instead of treating them as missed.
    /// Off by default: canceled events take part in the walk.
    pub skip_canceled_events: bool,
}

/// Computes a member's current streak from attendance and event history
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakCalculator {
    policy: StreakPolicy,
}

impl StreakCalculator {
    /// Create a calculator with the given policy
    pub fn new(policy: StreakPolicy) -> Self {
        Self { policy }
    }

    /// Policy in effect
    pub fn policy(&self) -> StreakPolicy {
        self.policy
    }

    /// Count the unbroken run of checked-in events, newest first, among
    /// events started at or before `now`. The first started event without a
    /// check-in ends the run.
    ///
    /// `attendances` should belong to a single member. `events` may come in
    /// any order; events that have not started yet are ignored.
    pub fn calculate(&self, attendances: &[Attendance], events: &[Event], now: DateTime<Utc>) -> u32 {
        let checked_in: HashSet<&str> = attendances
            .iter()
            .filter(|a| a.is_checked_in())
            .map(|a| a.event_external_id.as_str())
            .collect();

        if checked_in.is_empty() {
            return 0;
        }

        let mut started: Vec<&Event> = events.iter().filter(|e| e.has_started(now)).collect();
        // Stable sort keeps the store's order for events sharing a start time
        started.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));

        let mut streak = 0;
        for event in started {
            if event.canceled && self.policy.skip_canceled_events {
                continue;
            }
            if !checked_in.contains(event.external_id.as_str()) {
                break;
            }
            streak += 1;
        }
        streak
    }
}

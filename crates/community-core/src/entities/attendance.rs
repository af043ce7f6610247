//! Attendance entity - join record between a member and an event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::MemberId;

/// Attendance lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "registered")]
    Registered,
    #[serde(rename = "checked-in")]
    CheckedIn,
}

impl AttendanceStatus {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::CheckedIn => "checked-in",
        }
    }

    /// Parse from storage representation
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "registered" => Ok(Self::Registered),
            "checked-in" => Ok(Self::CheckedIn),
            other => Err(DomainError::InvalidData(format!(
                "unknown attendance status: {other}"
            ))),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attendance record, unique per (member, event)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub member_id: MemberId,
    pub event_external_id: String,
    pub status: AttendanceStatus,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl Attendance {
    /// Create a registration (not yet checked in)
    pub fn registered(member_id: MemberId, event_external_id: impl Into<String>) -> Self {
        Self {
            member_id,
            event_external_id: event_external_id.into(),
            status: AttendanceStatus::Registered,
            checked_in_at: None,
        }
    }

    /// Create a record that is already checked in at `at`
    pub fn checked_in(
        member_id: MemberId,
        event_external_id: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            member_id,
            event_external_id: event_external_id.into(),
            status: AttendanceStatus::CheckedIn,
            checked_in_at: Some(at),
        }
    }

    /// Counts toward streaks only with both the status and a timestamp
    #[inline]
    pub fn is_checked_in(&self) -> bool {
        self.status == AttendanceStatus::CheckedIn && self.checked_in_at.is_some()
    }

    /// Transition to checked-in. Returns false (and changes nothing) if
    /// the record was already checked in with a timestamp.
    pub fn mark_checked_in(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_checked_in() {
            return false;
        }
        self.status = AttendanceStatus::CheckedIn;
        self.checked_in_at = Some(at);
        true
    }
}

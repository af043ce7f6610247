//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Uniqueness of attendance per
//! (member, event) and of grants per (member, badge) is the store's job;
//! callers must not assume they are the only writer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Attendance, Badge, Event, Member, MemberBadge};
use crate::error::DomainError;
use crate::value_objects::{BadgeId, MemberId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Attendance Repository
// ============================================================================

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// All attendance records of a member, any status
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Attendance>>;

    /// Attendance of a member at one event
    async fn find(
        &self,
        member_id: MemberId,
        event_external_id: &str,
    ) -> RepoResult<Option<Attendance>>;

    /// Number of checked-in records of a member
    async fn checked_in_count_by_member(&self, member_id: MemberId) -> RepoResult<u32>;

    /// Insert a `registered` record. Returns false when a record for the
    /// pair already exists (left unchanged).
    async fn register(&self, member_id: MemberId, event_external_id: &str) -> RepoResult<bool>;

    /// Upsert to checked-in. Returns true only when the record transitioned;
    /// an already checked-in record keeps its original timestamp.
    async fn check_in(
        &self,
        member_id: MemberId,
        event_external_id: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Event Repository
// ============================================================================

/// Result ordering by start timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Event listing filter, evaluated against an `as_of` instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFilter {
    /// Only events starting after `as_of`
    pub upcoming_only: bool,
    /// Only events starting at or before `as_of`
    pub past_only: bool,
    pub include_canceled: bool,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            upcoming_only: false,
            past_only: false,
            include_canceled: true,
        }
    }
}

impl EventFilter {
    /// Events that have already started, canceled ones included
    pub fn started() -> Self {
        Self {
            past_only: true,
            ..Self::default()
        }
    }

    /// Check a single event against this filter
    pub fn matches(&self, event: &Event, as_of: DateTime<Utc>) -> bool {
        if self.upcoming_only && event.has_started(as_of) {
            return false;
        }
        if self.past_only && !event.has_started(as_of) {
            return false;
        }
        self.include_canceled || !event.canceled
    }
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// List events matching `filter` at `as_of`, ordered by start time
    async fn find_all(
        &self,
        filter: EventFilter,
        as_of: DateTime<Utc>,
        order: SortOrder,
    ) -> RepoResult<Vec<Event>>;

    /// Find event by calendar identifier
    async fn find_by_external_id(&self, external_id: &str) -> RepoResult<Option<Event>>;

    /// Insert an event
    async fn create(&self, event: &Event) -> RepoResult<()>;
}

// ============================================================================
// Badge Repository
// ============================================================================

#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// Find badge definition by its unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Badge>>;

    /// Bulk lookup; names without a definition are simply absent
    async fn find_by_names(&self, names: &[&str]) -> RepoResult<Vec<Badge>>;

    /// Check whether the member holds the badge
    async fn has_badge(&self, member_id: MemberId, badge_id: BadgeId) -> RepoResult<bool>;

    /// All grants held by a member
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<MemberBadge>>;

    /// Grant a badge. Returns None when the member already holds it,
    /// including when a concurrent writer won the race.
    async fn grant(&self, member_id: MemberId, badge_id: BadgeId)
        -> RepoResult<Option<MemberBadge>>;

    /// Insert a badge definition
    async fn create(&self, badge: &Badge) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;

    /// Identifiers of every member, for batch maintenance
    async fn list_ids(&self) -> RepoResult<Vec<MemberId>>;

    /// Insert a member
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Overwrite the cached streak count
    async fn set_streak_count(&self, id: MemberId, count: u32) -> RepoResult<()>;
}

//! DashMap-backed implementation of the repository traits

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, instrument};

use community_core::entities::{Attendance, Badge, Event, Member, MemberBadge};
use community_core::error::DomainError;
use community_core::traits::{
    AttendanceRepository, BadgeRepository, EventFilter, EventRepository, MemberRepository,
    RepoResult, SortOrder,
};
use community_core::value_objects::{BadgeId, MemberId};

type AttendanceKey = (MemberId, String);

#[derive(Default)]
struct Tables {
    members: DashMap<MemberId, Member>,
    /// Keyed by calendar id, which is unique
    events: DashMap<String, Event>,
    attendances: DashMap<AttendanceKey, Attendance>,
    /// Keyed by badge name, which is unique
    badges: DashMap<String, Badge>,
    grants: DashMap<(MemberId, BadgeId), MemberBadge>,
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attendance rows, across all members
    pub fn attendance_count(&self) -> usize {
        self.tables.attendances.len()
    }

    /// Number of grant rows, across all members
    pub fn grant_count(&self) -> usize {
        self.tables.grants.len()
    }

    fn badge_exists(&self, badge_id: BadgeId) -> bool {
        self.tables.badges.iter().any(|b| b.id == badge_id)
    }
}

// ============================================================================
// Members
// ============================================================================

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        Ok(self.tables.members.get(&id).map(|m| m.value().clone()))
    }

    async fn list_ids(&self) -> RepoResult<Vec<MemberId>> {
        let mut ids: Vec<MemberId> = self.tables.members.iter().map(|m| *m.key()).collect();
        ids.sort();
        Ok(ids)
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        let email_taken = self
            .tables
            .members
            .iter()
            .any(|m| m.email == member.email && m.id != member.id);
        if email_taken {
            return Err(DomainError::InvalidData(format!(
                "member already exists: {}",
                member.email
            )));
        }

        match self.tables.members.entry(member.id) {
            Entry::Occupied(_) => Err(DomainError::InvalidData(format!(
                "member already exists: {}",
                member.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(member.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn set_streak_count(&self, id: MemberId, count: u32) -> RepoResult<()> {
        let mut member = self
            .tables
            .members
            .get_mut(&id)
            .ok_or(DomainError::MemberNotFound(id))?;
        member.set_streak_count(count);
        Ok(())
    }
}

// ============================================================================
// Events
// ============================================================================

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_all(
        &self,
        filter: EventFilter,
        as_of: DateTime<Utc>,
        order: SortOrder,
    ) -> RepoResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .tables
            .events
            .iter()
            .filter(|e| filter.matches(e.value(), as_of))
            .map(|e| e.value().clone())
            .collect();

        events.sort_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.external_id.cmp(&b.external_id))
        });
        if order == SortOrder::Descending {
            events.reverse();
        }
        Ok(events)
    }

    async fn find_by_external_id(&self, external_id: &str) -> RepoResult<Option<Event>> {
        Ok(self.tables.events.get(external_id).map(|e| e.value().clone()))
    }

    async fn create(&self, event: &Event) -> RepoResult<()> {
        match self.tables.events.entry(event.external_id.clone()) {
            Entry::Occupied(_) => Err(DomainError::InvalidData(format!(
                "event already exists: {}",
                event.external_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(event.clone());
                Ok(())
            }
        }
    }
}

// ============================================================================
// Attendance
// ============================================================================

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Attendance>> {
        let mut rows: Vec<Attendance> = self
            .tables
            .attendances
            .iter()
            .filter(|a| a.key().0 == member_id)
            .map(|a| a.value().clone())
            .collect();
        rows.sort_by(|a, b| a.event_external_id.cmp(&b.event_external_id));
        Ok(rows)
    }

    async fn find(
        &self,
        member_id: MemberId,
        event_external_id: &str,
    ) -> RepoResult<Option<Attendance>> {
        let key = (member_id, event_external_id.to_string());
        Ok(self.tables.attendances.get(&key).map(|a| a.value().clone()))
    }

    async fn checked_in_count_by_member(&self, member_id: MemberId) -> RepoResult<u32> {
        let count = self
            .tables
            .attendances
            .iter()
            .filter(|a| a.key().0 == member_id && a.is_checked_in())
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn register(&self, member_id: MemberId, event_external_id: &str) -> RepoResult<bool> {
        let key = (member_id, event_external_id.to_string());
        match self.tables.attendances.entry(key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(Attendance::registered(member_id, event_external_id));
                Ok(true)
            }
        }
    }

    #[instrument(skip(self))]
    async fn check_in(
        &self,
        member_id: MemberId,
        event_external_id: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let key = (member_id, event_external_id.to_string());
        let transitioned = match self.tables.attendances.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().mark_checked_in(at),
            Entry::Vacant(slot) => {
                slot.insert(Attendance::checked_in(member_id, event_external_id, at));
                true
            }
        };
        if !transitioned {
            debug!("Attendance already checked in");
        }
        Ok(transitioned)
    }
}

// ============================================================================
// Badges
// ============================================================================

#[async_trait]
impl BadgeRepository for MemoryStore {
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Badge>> {
        Ok(self.tables.badges.get(name).map(|b| b.value().clone()))
    }

    async fn find_by_names(&self, names: &[&str]) -> RepoResult<Vec<Badge>> {
        Ok(names
            .iter()
            .filter_map(|name| self.tables.badges.get(*name).map(|b| b.value().clone()))
            .collect())
    }

    async fn has_badge(&self, member_id: MemberId, badge_id: BadgeId) -> RepoResult<bool> {
        Ok(self.tables.grants.contains_key(&(member_id, badge_id)))
    }

    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<MemberBadge>> {
        let mut grants: Vec<MemberBadge> = self
            .tables
            .grants
            .iter()
            .filter(|g| g.key().0 == member_id)
            .map(|g| g.value().clone())
            .collect();
        grants.sort_by_key(|g| g.awarded_at);
        Ok(grants)
    }

    #[instrument(skip(self))]
    async fn grant(
        &self,
        member_id: MemberId,
        badge_id: BadgeId,
    ) -> RepoResult<Option<MemberBadge>> {
        if !self.tables.members.contains_key(&member_id) || !self.badge_exists(badge_id) {
            return Err(DomainError::InvalidData(format!(
                "grant references unknown member {member_id} or badge {badge_id}"
            )));
        }

        match self.tables.grants.entry((member_id, badge_id)) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let grant = MemberBadge::new(member_id, badge_id);
                slot.insert(grant.clone());
                Ok(Some(grant))
            }
        }
    }

    async fn create(&self, badge: &Badge) -> RepoResult<()> {
        match self.tables.badges.entry(badge.name.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateBadgeName(badge.name.clone())),
            Entry::Vacant(slot) => {
                slot.insert(badge.clone());
                Ok(())
            }
        }
    }
}

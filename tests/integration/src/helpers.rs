//! Test helpers for integration tests
//!
//! Wraps an in-memory store and a service context over it, and offers
//! shortcuts for seeding members, events and check-ins.

use chrono::{DateTime, Utc};
use community_core::{
    AttendanceRepository, BadgeId, BadgeRepository, Event, EventRepository, MemberId,
    MemberRepository, MILESTONES,
};
use community_db::MemoryStore;
use community_service::{
    BadgeService, CheckInService, ServiceContext, ServiceSettings, StreakService,
};

use crate::fixtures::{unique_member, WeeklySchedule};

/// In-memory community with the service stack wired over it
pub struct TestCommunity {
    pub store: MemoryStore,
    pub ctx: ServiceContext,
    pub now: DateTime<Utc>,
}

impl TestCommunity {
    /// Empty community with no badge definitions
    pub fn empty() -> Self {
        Self::with_settings(ServiceSettings::default())
    }

    /// Empty community with custom service settings
    pub fn with_settings(settings: ServiceSettings) -> Self {
        let store = MemoryStore::new();
        let ctx = ServiceContext::in_memory(store.clone(), settings);
        Self {
            store,
            ctx,
            now: Utc::now(),
        }
    }

    /// Community with every milestone badge defined
    pub async fn seeded() -> Self {
        let community = Self::empty();
        community
            .badges()
            .ensure_milestone_badges()
            .await
            .expect("Failed to seed badges");
        community
    }

    pub fn check_ins(&self) -> CheckInService<'_> {
        CheckInService::new(&self.ctx)
    }

    pub fn streaks(&self) -> StreakService<'_> {
        StreakService::new(&self.ctx)
    }

    pub fn badges(&self) -> BadgeService<'_> {
        BadgeService::new(&self.ctx)
    }

    /// Create a member and return its id
    pub async fn add_member(&self) -> MemberId {
        let member = unique_member();
        MemberRepository::create(&self.store, &member)
            .await
            .expect("Failed to create member");
        member.id
    }

    pub async fn add_event(&self, event: &Event) {
        EventRepository::create(&self.store, event)
            .await
            .expect("Failed to create event");
    }

    /// Store every event of a schedule
    pub async fn add_schedule(&self, schedule: &WeeklySchedule) {
        for event in &schedule.events {
            self.add_event(event).await;
        }
    }

    /// Record check-ins directly in the store, bypassing the services
    pub async fn record_check_ins(&self, member_id: MemberId, external_ids: &[&str]) {
        for id in external_ids {
            self.store
                .check_in(member_id, id, self.now)
                .await
                .expect("Failed to record check-in");
        }
    }

    /// Cached streak count of a member
    pub async fn stored_streak(&self, member_id: MemberId) -> u32 {
        self.store
            .find_by_id(member_id)
            .await
            .expect("Failed to load member")
            .expect("Member missing")
            .streak_count
    }

    /// Names of the milestone badges a member holds, sorted
    pub async fn held_badge_names(&self, member_id: MemberId) -> Vec<String> {
        let held: Vec<BadgeId> = self
            .badges()
            .held_badges(member_id)
            .await
            .expect("Failed to load grants")
            .into_iter()
            .map(|grant| grant.badge_id)
            .collect();

        let names: Vec<&str> = MILESTONES.iter().map(|m| m.badge_name).collect();
        let mut held_names: Vec<String> = self
            .store
            .find_by_names(&names)
            .await
            .expect("Failed to load badges")
            .into_iter()
            .filter(|badge| held.contains(&badge.id))
            .map(|badge| badge.name)
            .collect();
        held_names.sort();
        held_names
    }
}

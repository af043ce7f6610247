//! Fixtures shared by the service tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use community_core::{
    AttendanceRepository, Badge, BadgeId, BadgeRepository, DomainError, Event, EventRepository,
    Member, MemberBadge, MemberId, MemberRepository, RepoResult,
};
use community_db::MemoryStore;

use super::badge::BadgeService;
use super::context::{ServiceContext, ServiceSettings};

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub ctx: ServiceContext,
    pub now: DateTime<Utc>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let ctx = ServiceContext::in_memory(store.clone(), ServiceSettings::default());
        Self {
            store,
            ctx,
            now: Utc::now(),
        }
    }

    /// Fixture with every milestone badge defined
    pub async fn seeded() -> Self {
        let fx = Self::new();
        BadgeService::new(&fx.ctx)
            .ensure_milestone_badges()
            .await
            .unwrap();
        fx
    }

    pub async fn member(&self, email: &str) -> MemberId {
        let member = Member::new(MemberId::new_v4(), email.to_string());
        MemberRepository::create(&self.store, &member).await.unwrap();
        member.id
    }

    pub async fn event(&self, external_id: &str, starts_at: DateTime<Utc>) {
        EventRepository::create(&self.store, &Event::new(external_id, starts_at))
            .await
            .unwrap();
    }

    /// Started events `e1` (oldest) to `e{count}` (latest), one week apart
    pub async fn weekly_events(&self, count: u32) {
        for i in 1..=count {
            let weeks_ago = i64::from(count - i);
            let starts_at = self.now - Duration::weeks(weeks_ago) - Duration::hours(1);
            self.event(&format!("e{i}"), starts_at).await;
        }
    }

    pub async fn check_in_all(&self, member_id: MemberId, external_ids: &[&str]) {
        for id in external_ids {
            self.store.check_in(member_id, id, self.now).await.unwrap();
        }
    }

    pub async fn badge(&self, name: &str) -> BadgeId {
        self.store.find_by_name(name).await.unwrap().unwrap().id
    }

    /// Context whose member repository is replaced
    pub fn ctx_with_members(&self, members: impl MemberRepository + 'static) -> ServiceContext {
        ServiceContext::new(
            Arc::new(members),
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            ServiceSettings::default(),
        )
    }

    /// Context whose badge repository is replaced
    pub fn ctx_with_badges(&self, badges: impl BadgeRepository + 'static) -> ServiceContext {
        ServiceContext::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(badges),
            ServiceSettings::default(),
        )
    }
}

fn unavailable() -> DomainError {
    DomainError::StoreUnavailable("injected failure".to_string())
}

/// Member repository that misbehaves for one member id
pub(crate) struct ScriptedMembers {
    inner: MemoryStore,
    member_id: MemberId,
    listed_but_missing: bool,
}

impl ScriptedMembers {
    /// Streak writes for `member_id` fail with a store outage
    pub fn failing_streak_write(inner: MemoryStore, member_id: MemberId) -> Self {
        Self {
            inner,
            member_id,
            listed_but_missing: false,
        }
    }

    /// `member_id` is listed but cannot be loaded, as if deleted mid-batch
    pub fn listed_but_missing(inner: MemoryStore, member_id: MemberId) -> Self {
        Self {
            inner,
            member_id,
            listed_but_missing: true,
        }
    }
}

#[async_trait]
impl MemberRepository for ScriptedMembers {
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        if self.listed_but_missing && id == self.member_id {
            return Ok(None);
        }
        self.inner.find_by_id(id).await
    }

    async fn list_ids(&self) -> RepoResult<Vec<MemberId>> {
        let mut ids = self.inner.list_ids().await?;
        if self.listed_but_missing {
            ids.push(self.member_id);
        }
        Ok(ids)
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        MemberRepository::create(&self.inner, member).await
    }

    async fn set_streak_count(&self, id: MemberId, count: u32) -> RepoResult<()> {
        if !self.listed_but_missing && id == self.member_id {
            return Err(unavailable());
        }
        self.inner.set_streak_count(id, count).await
    }
}

/// Badge repository whose grant misbehaves for one badge
pub(crate) struct ScriptedGrant {
    inner: MemoryStore,
    badge_id: BadgeId,
    lose_race: bool,
}

impl ScriptedGrant {
    /// Granting `badge_id` fails with a store outage
    pub fn failing(inner: MemoryStore, badge_id: BadgeId) -> Self {
        Self {
            inner,
            badge_id,
            lose_race: false,
        }
    }

    /// Granting `badge_id` reports it as already held, as when a concurrent
    /// writer inserted it after holdings were read
    pub fn losing_race(inner: MemoryStore, badge_id: BadgeId) -> Self {
        Self {
            inner,
            badge_id,
            lose_race: true,
        }
    }
}

#[async_trait]
impl BadgeRepository for ScriptedGrant {
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Badge>> {
        self.inner.find_by_name(name).await
    }

    async fn find_by_names(&self, names: &[&str]) -> RepoResult<Vec<Badge>> {
        self.inner.find_by_names(names).await
    }

    async fn has_badge(&self, member_id: MemberId, badge_id: BadgeId) -> RepoResult<bool> {
        self.inner.has_badge(member_id, badge_id).await
    }

    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<MemberBadge>> {
        BadgeRepository::find_by_member(&self.inner, member_id).await
    }

    async fn grant(
        &self,
        member_id: MemberId,
        badge_id: BadgeId,
    ) -> RepoResult<Option<MemberBadge>> {
        if badge_id != self.badge_id {
            return self.inner.grant(member_id, badge_id).await;
        }
        if self.lose_race {
            self.inner.grant(member_id, badge_id).await?;
            return Ok(None);
        }
        Err(unavailable())
    }

    async fn create(&self, badge: &Badge) -> RepoResult<()> {
        BadgeRepository::create(&self.inner, badge).await
    }
}

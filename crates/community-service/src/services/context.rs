//! Service context - dependency container for services
//!
//! Holds the repositories and the settings every service needs.

use std::sync::Arc;

use community_common::AppConfig;
use community_core::traits::{
    AttendanceRepository, BadgeRepository, EventRepository, MemberRepository,
};
use community_core::{StreakCalculator, StreakPolicy};
use community_db::{
    MemoryStore, PgAttendanceRepository, PgBadgeRepository, PgEventRepository,
    PgMemberRepository, PgPool,
};

/// Tunables for the services
#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub streak_policy: StreakPolicy,
    /// Members processed at once by batch operations
    pub batch_concurrency: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            streak_policy: StreakPolicy::default(),
            batch_concurrency: 4,
        }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            streak_policy: config.streak.policy(),
            batch_concurrency: config.batch.concurrency,
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    event_repo: Arc<dyn EventRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,
    badge_repo: Arc<dyn BadgeRepository>,

    calculator: StreakCalculator,
    batch_concurrency: usize,
}

impl ServiceContext {
    /// Create a new service context from individual repositories
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        event_repo: Arc<dyn EventRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        badge_repo: Arc<dyn BadgeRepository>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            member_repo,
            event_repo,
            attendance_repo,
            badge_repo,
            calculator: StreakCalculator::new(settings.streak_policy),
            batch_concurrency: settings.batch_concurrency.max(1),
        }
    }

    /// Context backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, settings: ServiceSettings) -> Self {
        Self::new(
            Arc::new(PgMemberRepository::new(pool.clone())),
            Arc::new(PgEventRepository::new(pool.clone())),
            Arc::new(PgAttendanceRepository::new(pool.clone())),
            Arc::new(PgBadgeRepository::new(pool)),
            settings,
        )
    }

    /// Context backed by an in-memory store
    pub fn in_memory(store: MemoryStore, settings: ServiceSettings) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            settings,
        )
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the attendance repository
    pub fn attendance_repo(&self) -> &dyn AttendanceRepository {
        self.attendance_repo.as_ref()
    }

    /// Get the badge repository
    pub fn badge_repo(&self) -> &dyn BadgeRepository {
        self.badge_repo.as_ref()
    }

    // === Settings ===

    /// Streak calculator configured with the active policy
    pub fn streak_calculator(&self) -> &StreakCalculator {
        &self.calculator
    }

    /// Members processed at once by batch operations (at least 1)
    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }
}

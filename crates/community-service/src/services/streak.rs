//! Streak service
//!
//! Reads attendance and event history, runs the pure streak calculation and
//! owns the only write path for the member's cached streak count.

use chrono::{DateTime, Utc};
use community_core::traits::{EventFilter, SortOrder};
use community_core::{Attendance, MemberId};
use tracing::{info, instrument};

use super::batch::{for_each_member, BatchReport};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Streak service
pub struct StreakService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StreakService<'a> {
    /// Create a new StreakService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current streak of a member, evaluated now. No side effects.
    pub async fn calculate(&self, member_id: MemberId) -> ServiceResult<u32> {
        self.calculate_at(member_id, Utc::now()).await
    }

    /// Current streak of a member as of `now`
    #[instrument(skip(self))]
    pub async fn calculate_at(&self, member_id: MemberId, now: DateTime<Utc>) -> ServiceResult<u32> {
        let attendances = self
            .ctx
            .attendance_repo()
            .find_by_member(member_id)
            .await?;

        if !attendances.iter().any(Attendance::is_checked_in) {
            return Ok(0);
        }

        // One read of the event list per calculation keeps the ordering stable
        let events = self
            .ctx
            .event_repo()
            .find_all(EventFilter::started(), now, SortOrder::Descending)
            .await?;

        Ok(self
            .ctx
            .streak_calculator()
            .calculate(&attendances, &events, now))
    }

    /// Recompute and persist the member's cached streak
    pub async fn update(&self, member_id: MemberId) -> ServiceResult<u32> {
        self.update_at(member_id, Utc::now()).await
    }

    /// Recompute as of `now` and persist
    #[instrument(skip(self))]
    pub async fn update_at(&self, member_id: MemberId, now: DateTime<Utc>) -> ServiceResult<u32> {
        let streak = self.calculate_at(member_id, now).await?;

        self.ctx
            .member_repo()
            .set_streak_count(member_id, streak)
            .await?;

        info!(member_id = %member_id, streak, "Streak updated");

        Ok(streak)
    }

    /// Recompute and persist streaks for every member
    pub async fn recompute_all(&self) -> ServiceResult<BatchReport> {
        let now = Utc::now();
        for_each_member(self.ctx, "recompute_streaks", |member_id| async move {
            self.update_at(member_id, now).await.map(|_| ())
        })
        .await
    }
}

//! Check-in service
//!
//! A check-in succeeds once the attendance write succeeds. The streak update
//! and badge award that follow are best effort: their failures are logged
//! and reflected in the outcome, never returned as errors.

use chrono::{DateTime, Utc};
use community_core::{DomainError, Member, MemberId};
use tracing::{info, instrument, warn};

use super::badge::{AwardReport, BadgeService};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::streak::StreakService;

/// Result of a check-in
#[derive(Debug)]
pub struct CheckInOutcome {
    /// False when the member was already checked in
    pub newly_checked_in: bool,
    /// Updated streak, or None when the update failed
    pub streak: Option<u32>,
    /// Award pass result, or None when it failed as a whole
    pub badges: Option<AwardReport>,
}

impl CheckInOutcome {
    /// Names of badges granted by this check-in
    pub fn granted_names(&self) -> Vec<&str> {
        self.badges
            .as_ref()
            .map(AwardReport::granted_names)
            .unwrap_or_default()
    }
}

/// Check-in service
pub struct CheckInService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CheckInService<'a> {
    /// Create a new CheckInService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a member for an event. Returns false if already registered
    /// or checked in.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        member_id: MemberId,
        event_external_id: &str,
    ) -> ServiceResult<bool> {
        self.require_member(member_id).await?;
        self.require_event(event_external_id).await?;

        Ok(self
            .ctx
            .attendance_repo()
            .register(member_id, event_external_id)
            .await?)
    }

    /// Check a member in to an event now
    pub async fn check_in(
        &self,
        member_id: MemberId,
        event_external_id: &str,
    ) -> ServiceResult<CheckInOutcome> {
        self.check_in_at(member_id, event_external_id, Utc::now())
            .await
    }

    /// Check a member in at `now`, then refresh their streak and badges
    #[instrument(skip(self))]
    pub async fn check_in_at(
        &self,
        member_id: MemberId,
        event_external_id: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<CheckInOutcome> {
        let member = self.require_member(member_id).await?;
        self.require_event(event_external_id).await?;

        // Already checked in comes back as false, not as an error
        let newly_checked_in = self
            .ctx
            .attendance_repo()
            .check_in(member_id, event_external_id, now)
            .await?;

        if newly_checked_in {
            info!(member_id = %member_id, event = event_external_id, "Member checked in");
        }

        let streak = match StreakService::new(self.ctx).update_at(member_id, now).await {
            Ok(streak) => Some(streak),
            Err(error) => {
                warn!(
                    member_id = %member_id,
                    code = error.error_code(),
                    error = %error,
                    "Streak update failed after check-in"
                );
                None
            }
        };

        // Fall back to the cached value so check-in badges are still awarded
        let badges = match BadgeService::new(self.ctx)
            .award_for_member(member_id, streak.unwrap_or(member.streak_count))
            .await
        {
            Ok(report) => Some(report),
            Err(error) => {
                warn!(
                    member_id = %member_id,
                    code = error.error_code(),
                    error = %error,
                    "Badge award failed after check-in"
                );
                None
            }
        };

        Ok(CheckInOutcome {
            newly_checked_in,
            streak,
            badges,
        })
    }

    async fn require_member(&self, member_id: MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(member_id).into())
    }

    async fn require_event(&self, event_external_id: &str) -> ServiceResult<()> {
        match self
            .ctx
            .event_repo()
            .find_by_external_id(event_external_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(DomainError::EventNotFound(event_external_id.to_string()).into()),
        }
    }
}

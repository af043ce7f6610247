//! Badge service
//!
//! Grants every milestone badge a member's statistics qualify for. Awards are
//! cumulative and monotonic: badges are only ever added, never revoked.

use std::collections::{HashMap, HashSet};

use community_core::{
    eligible_badge_names, Badge, BadgeId, DomainError, MemberBadge, MemberId, MemberStats,
    MILESTONES,
};
use tracing::{debug, info, instrument, warn};

use super::batch::{for_each_member, BatchReport};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A badge that could not be checked or granted
#[derive(Debug)]
pub struct BadgeFailure {
    pub badge_name: String,
    pub error: ServiceError,
}

/// Outcome of one award pass for one member
#[derive(Debug, Default)]
pub struct AwardReport {
    /// Badges newly granted by this pass
    pub granted: Vec<Badge>,
    /// Eligible badge names with no definition in the store
    pub missing_definitions: Vec<String>,
    pub failures: Vec<BadgeFailure>,
}

impl AwardReport {
    /// Names of the newly granted badges
    pub fn granted_names(&self) -> Vec<&str> {
        self.granted.iter().map(|b| b.name.as_str()).collect()
    }

    /// True when every eligible badge was resolved
    pub fn is_complete(&self) -> bool {
        self.missing_definitions.is_empty() && self.failures.is_empty()
    }
}

/// Badge service
pub struct BadgeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BadgeService<'a> {
    /// Create a new BadgeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Grant every badge the given statistics qualify for.
    ///
    /// A missing definition or a failure on one badge is recorded and the
    /// remaining badges are still processed. Only the definition and
    /// holdings lookups are fatal.
    #[instrument(skip(self))]
    pub async fn award_for_stats(
        &self,
        member_id: MemberId,
        check_ins: u32,
        streak: u32,
    ) -> ServiceResult<AwardReport> {
        let mut report = AwardReport::default();

        let names = eligible_badge_names(MemberStats::new(check_ins, streak));
        if names.is_empty() {
            return Ok(report);
        }

        let mut definitions: HashMap<String, Badge> = self
            .ctx
            .badge_repo()
            .find_by_names(&names)
            .await?
            .into_iter()
            .map(|badge| (badge.name.clone(), badge))
            .collect();

        let held: HashSet<BadgeId> = self
            .ctx
            .badge_repo()
            .find_by_member(member_id)
            .await?
            .into_iter()
            .map(|grant| grant.badge_id)
            .collect();

        for name in names {
            let Some(badge) = definitions.remove(name) else {
                warn!(member_id = %member_id, badge = name, "Badge definition missing, skipping");
                report.missing_definitions.push(name.to_string());
                continue;
            };
            if held.contains(&badge.id) {
                continue;
            }

            match self.grant(member_id, &badge).await {
                Ok(true) => {
                    info!(member_id = %member_id, badge = %badge.name, "Badge awarded");
                    report.granted.push(badge);
                }
                Ok(false) => {}
                Err(error) => {
                    warn!(
                        member_id = %member_id,
                        badge = %badge.name,
                        code = error.error_code(),
                        error = %error,
                        "Badge award failed"
                    );
                    report.failures.push(BadgeFailure {
                        badge_name: badge.name,
                        error,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Award using the stored check-in count and the given streak
    pub async fn award_for_member(
        &self,
        member_id: MemberId,
        streak: u32,
    ) -> ServiceResult<AwardReport> {
        let check_ins = self
            .ctx
            .attendance_repo()
            .checked_in_count_by_member(member_id)
            .await?;

        self.award_for_stats(member_id, check_ins, streak).await
    }

    /// Badges currently held by a member
    pub async fn held_badges(&self, member_id: MemberId) -> ServiceResult<Vec<MemberBadge>> {
        Ok(self.ctx.badge_repo().find_by_member(member_id).await?)
    }

    /// Create a definition for every milestone that has none.
    /// Returns the number of definitions created.
    #[instrument(skip(self))]
    pub async fn ensure_milestone_badges(&self) -> ServiceResult<usize> {
        let names: Vec<&str> = MILESTONES.iter().map(|m| m.badge_name).collect();
        let existing: Vec<String> = self
            .ctx
            .badge_repo()
            .find_by_names(&names)
            .await?
            .into_iter()
            .map(|badge| badge.name)
            .collect();

        let mut created = 0;
        for milestone in MILESTONES {
            if existing.iter().any(|name| name == milestone.badge_name) {
                continue;
            }

            let badge = Badge::new(milestone.badge_name, milestone.icon, milestone.criteria());
            match self.ctx.badge_repo().create(&badge).await {
                Ok(()) => created += 1,
                // Another writer seeded it first
                Err(e) if e.is_duplicate() => {}
                Err(e) => return Err(e.into()),
            }
        }

        if created > 0 {
            info!(created, "Milestone badge definitions seeded");
        }
        Ok(created)
    }

    /// Run an award pass for every member using the cached streak.
    /// A member with any badge failure is reported as failed.
    pub async fn award_all(&self) -> ServiceResult<BatchReport> {
        for_each_member(self.ctx, "award_badges", |member_id| async move {
            let member = self
                .ctx
                .member_repo()
                .find_by_id(member_id)
                .await?
                .ok_or(DomainError::MemberNotFound(member_id))?;

            let report = self.award_for_member(member_id, member.streak_count).await?;
            match report.failures.into_iter().next() {
                None => Ok(()),
                Some(failure) => Err(failure.error),
            }
        })
        .await
    }

    /// Returns true when the badge was newly granted
    async fn grant(&self, member_id: MemberId, badge: &Badge) -> ServiceResult<bool> {
        let granted = self.ctx.badge_repo().grant(member_id, badge.id).await?;
        if granted.is_none() {
            debug!(member_id = %member_id, badge = %badge.name, "Badge granted concurrently");
        }
        Ok(granted.is_some())
    }
}

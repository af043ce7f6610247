//! # community-worker
//!
//! Offline maintenance: seeds the milestone badge definitions, then
//! recomputes every member's streak and runs a badge award pass for every
//! member.

use anyhow::Context;
use community_common::AppConfig;
use community_db::{create_pool, run_migrations};
use community_service::{
    BadgeService, BatchReport, ServiceContext, ServiceResult, ServiceSettings, StreakService,
};
use tracing::{info, warn};

/// Outcome of one maintenance run
#[derive(Debug)]
pub struct MaintenanceSummary {
    pub badges_seeded: usize,
    pub streaks: BatchReport,
    pub badges: BatchReport,
}

impl MaintenanceSummary {
    /// True when no member failed in either pass
    pub fn is_clean(&self) -> bool {
        self.streaks.is_clean() && self.badges.is_clean()
    }
}

/// Connect to the database and run maintenance against it
pub async fn run(config: AppConfig) -> anyhow::Result<MaintenanceSummary> {
    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Database pool created"
    );

    if let Some(dir) = &config.database.migrations_dir {
        run_migrations(&pool, dir)
            .await
            .with_context(|| format!("failed to run migrations from {dir}"))?;
    }

    let ctx = ServiceContext::postgres(pool, ServiceSettings::from(&config));
    Ok(run_maintenance(&ctx).await?)
}

/// Seed badge definitions, then backfill streaks and badges.
///
/// Streaks are recomputed first so the award pass sees fresh values.
pub async fn run_maintenance(ctx: &ServiceContext) -> ServiceResult<MaintenanceSummary> {
    let badges_seeded = BadgeService::new(ctx).ensure_milestone_badges().await?;
    let streaks = StreakService::new(ctx).recompute_all().await?;
    let badges = BadgeService::new(ctx).award_all().await?;

    let summary = MaintenanceSummary {
        badges_seeded,
        streaks,
        badges,
    };

    if summary.is_clean() {
        info!(
            badges_seeded = summary.badges_seeded,
            members = summary.streaks.processed,
            "Maintenance finished"
        );
    } else {
        warn!(
            streak_failures = summary.streaks.failures.len(),
            badge_failures = summary.badges.failures.len(),
            "Maintenance finished with failures"
        );
    }

    Ok(summary)
}

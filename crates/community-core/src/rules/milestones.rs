//! Milestone table - which badge each check-in count or streak length earns
//!
//! Adding a threshold is a data change here; the award path iterates the
//! table generically.

use std::fmt;

/// Member statistic a milestone is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Total checked-in attendances
    CheckIns,
    /// Current consecutive-attendance streak
    Streak,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckIns => f.write_str("check-ins"),
            Self::Streak => f.write_str("streak"),
        }
    }
}

/// Snapshot of the statistics milestones are evaluated against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberStats {
    pub check_ins: u32,
    pub streak: u32,
}

impl MemberStats {
    pub fn new(check_ins: u32, streak: u32) -> Self {
        Self { check_ins, streak }
    }

    /// Value of one metric
    #[inline]
    pub fn get(&self, metric: Metric) -> u32 {
        match metric {
            Metric::CheckIns => self.check_ins,
            Metric::Streak => self.streak,
        }
    }
}

/// One row of the milestone table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub metric: Metric,
    pub threshold: u32,
    pub badge_name: &'static str,
    pub icon: &'static str,
}

impl Milestone {
    /// Met when the metric is at or above the threshold
    #[inline]
    pub fn is_met(&self, stats: &MemberStats) -> bool {
        stats.get(self.metric) >= self.threshold
    }

    /// Human-readable criteria stored with the badge definition
    pub fn criteria(&self) -> String {
        match (self.metric, self.threshold) {
            (Metric::CheckIns, 1) => "Check in to your first event".to_string(),
            (Metric::CheckIns, n) => format!("Check in to {n} events"),
            (Metric::Streak, n) => format!("Check in to {n} consecutive events"),
        }
    }
}

const fn milestone(
    metric: Metric,
    threshold: u32,
    badge_name: &'static str,
    icon: &'static str,
) -> Milestone {
    Milestone {
        metric,
        threshold,
        badge_name,
        icon,
    }
}

/// Every milestone, grouped by metric, thresholds ascending
pub const MILESTONES: &[Milestone] = &[
    milestone(Metric::CheckIns, 1, "First Check-in", "🎉"),
    milestone(Metric::CheckIns, 5, "5 Check-ins", "⭐"),
    milestone(Metric::CheckIns, 10, "10 Check-ins", "🌟"),
    milestone(Metric::CheckIns, 25, "25 Check-ins", "💫"),
    milestone(Metric::CheckIns, 50, "50 Check-ins", "🏆"),
    milestone(Metric::Streak, 3, "3 Week Streak", "🔥"),
    milestone(Metric::Streak, 5, "5 Week Streak", "🔥"),
    milestone(Metric::Streak, 10, "10 Week Streak", "⚡"),
    milestone(Metric::Streak, 25, "25 Week Streak", "💎"),
    milestone(Metric::Streak, 52, "52 Week Streak", "👑"),
];

/// All milestones met by `stats`. Eligibility is cumulative: meeting a
/// higher threshold never hides the lower ones.
pub fn eligible_milestones(stats: MemberStats) -> impl Iterator<Item = &'static Milestone> {
    MILESTONES.iter().filter(move |m| m.is_met(&stats))
}

/// Badge names for [`eligible_milestones`]
pub fn eligible_badge_names(stats: MemberStats) -> Vec<&'static str> {
    eligible_milestones(stats).map(|m| m.badge_name).collect()
}

/// Look up a milestone by its badge name
pub fn find_milestone(badge_name: &str) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| m.badge_name == badge_name)
}

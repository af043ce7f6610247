//! Pure business rules - streak walk and milestone eligibility
//!
//! Nothing in here touches a store; services fetch the data and hand it over.

mod milestones;
mod streak;

pub use milestones::{
    eligible_badge_names, eligible_milestones, find_milestone, MemberStats, Metric, Milestone,
    MILESTONES,
};
pub use streak::{StreakCalculator, StreakPolicy};

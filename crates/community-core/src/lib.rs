//! # community-core
//!
//! Domain layer containing entities, typed identifiers, repository traits and
//! the pure streak / milestone rules.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod rules;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Attendance, AttendanceStatus, Badge, Event, Member, MemberBadge};
pub use error::DomainError;
pub use rules::{
    eligible_badge_names, eligible_milestones, find_milestone, MemberStats, Metric, Milestone,
    StreakCalculator, StreakPolicy, MILESTONES,
};
pub use traits::{
    AttendanceRepository, BadgeRepository, EventFilter, EventRepository, MemberRepository,
    RepoResult, SortOrder,
};
pub use value_objects::{BadgeId, EventId, IdParseError, MemberBadgeId, MemberId};

//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AttendanceRepository, BadgeRepository, EventFilter, EventRepository, MemberRepository,
    RepoResult, SortOrder,
};

//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in community-core.

mod attendance;
mod badge;
mod error;
mod event;
mod member;

pub use attendance::PgAttendanceRepository;
pub use badge::PgBadgeRepository;
pub use event::PgEventRepository;
pub use member::PgMemberRepository;

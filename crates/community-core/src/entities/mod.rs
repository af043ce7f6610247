//! Domain entities - core business objects

mod attendance;
mod badge;
mod event;
mod member;

pub use attendance::{Attendance, AttendanceStatus};
pub use badge::{Badge, MemberBadge};
pub use event::Event;
pub use member::Member;

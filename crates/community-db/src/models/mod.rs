//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attendance;
mod badge;
mod event;
mod member;

pub use attendance::AttendanceModel;
pub use badge::{BadgeModel, MemberBadgeModel};
pub use event::EventModel;
pub use member::MemberModel;

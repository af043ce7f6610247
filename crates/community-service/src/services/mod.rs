//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of a call.

pub mod badge;
pub mod batch;
pub mod check_in;
pub mod context;
pub mod error;
pub mod streak;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use badge::{AwardReport, BadgeFailure, BadgeService};
pub use batch::{BatchReport, MemberFailure};
pub use check_in::{CheckInOutcome, CheckInService};
pub use context::{ServiceContext, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use streak::StreakService;

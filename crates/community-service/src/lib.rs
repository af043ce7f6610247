//! # community-service
//!
//! Application layer: the check-in flow, streak maintenance and milestone
//! badge awards, orchestrated over the repository traits.

pub mod services;

pub use services::{
    AwardReport, BadgeFailure, BadgeService, BatchReport, CheckInOutcome, CheckInService,
    MemberFailure, ServiceContext, ServiceError, ServiceResult, ServiceSettings, StreakService,
};

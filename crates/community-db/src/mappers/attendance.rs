//! Attendance entity <-> model mapper

use community_core::entities::{Attendance, AttendanceStatus};
use community_core::error::DomainError;
use community_core::value_objects::MemberId;

use crate::models::AttendanceModel;

/// Convert AttendanceModel to Attendance entity; fails on an unknown status
impl TryFrom<AttendanceModel> for Attendance {
    type Error = DomainError;

    fn try_from(model: AttendanceModel) -> Result<Self, Self::Error> {
        Ok(Attendance {
            member_id: MemberId::from_uuid(model.member_id),
            event_external_id: model.event_external_id,
            status: AttendanceStatus::parse(&model.status)?,
            checked_in_at: model.checked_in_at,
        })
    }
}

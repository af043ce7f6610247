//! Member entity <-> model mapper

use community_core::entities::Member;
use community_core::value_objects::MemberId;

use crate::models::MemberModel;

/// Convert MemberModel to Member entity
impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: MemberId::from_uuid(model.id),
            email: model.email,
            // Column has a non-negative CHECK; fall back to 0 if it was bypassed
            streak_count: u32::try_from(model.streak_count).unwrap_or(0),
            is_admin: model.is_admin,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Streak count as stored in the INTEGER column
pub fn streak_to_db(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

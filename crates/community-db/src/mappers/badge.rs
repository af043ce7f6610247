//! Badge / grant entity <-> model mappers

use community_core::entities::{Badge, MemberBadge};
use community_core::value_objects::{BadgeId, MemberBadgeId, MemberId};

use crate::models::{BadgeModel, MemberBadgeModel};

/// Convert BadgeModel to Badge entity
impl From<BadgeModel> for Badge {
    fn from(model: BadgeModel) -> Self {
        Badge {
            id: BadgeId::from_uuid(model.id),
            name: model.name,
            icon: model.icon,
            criteria: model.criteria,
        }
    }
}

/// Convert MemberBadgeModel to MemberBadge entity
impl From<MemberBadgeModel> for MemberBadge {
    fn from(model: MemberBadgeModel) -> Self {
        MemberBadge {
            id: MemberBadgeId::from_uuid(model.id),
            member_id: MemberId::from_uuid(model.member_id),
            badge_id: BadgeId::from_uuid(model.badge_id),
            awarded_at: model.awarded_at,
        }
    }
}

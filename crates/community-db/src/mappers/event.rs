//! Event entity <-> model mapper

use community_core::entities::Event;
use community_core::value_objects::EventId;

use crate::models::EventModel;

/// Convert EventModel to Event entity
impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: EventId::from_uuid(model.id),
            external_id: model.external_id,
            starts_at: model.starts_at,
            canceled: model.canceled,
        }
    }
}

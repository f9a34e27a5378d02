use db::models::{event, registration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub event_date: String,
    pub venue: String,
    pub capacity: i32,
    pub status: event::Status,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<event::Model> for EventResponse {
    fn from(m: event::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            category: m.category,
            event_date: m.event_date.to_rfc3339(),
            venue: m.venue,
            capacity: m.capacity,
            status: m.status,
            created_by: m.created_by,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

/// The caller's own registration, attached to event detail for students.
#[derive(Debug, Serialize)]
pub struct UserRegistration {
    pub registration_id: i64,
    pub status: registration::Status,
    pub waitlist_position: Option<i32>,
}

impl From<registration::Model> for UserRegistration {
    fn from(r: registration::Model) -> Self {
        Self {
            registration_id: r.id,
            status: r.status,
            waitlist_position: r.waitlist_position,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct EventDetailResponse {
    pub event: Option<EventResponse>,
    pub registered_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_registration: Option<UserRegistration>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<event::Status>,
    pub category: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Default)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct ListResponse {
    pub events: Vec<EventResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventReq {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub event_date: String,
    pub venue: String,
    pub capacity: Option<i32>,
    /// Wire-compat alias for `capacity`; `capacity` wins when both are sent.
    pub max_participants: Option<i32>,
    pub draft: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct EditEventReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub event_date: Option<String>,
    pub venue: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<event::Status>,
}

#[derive(Debug, Serialize, Default)]
pub struct CreatedEventResponse {
    pub event_id: i64,
}

/// Payload embedded in the printable check-in QR code.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct QrPayload {
    pub event_id: i64,
    pub secret: String,
    pub college_id: i64,
}

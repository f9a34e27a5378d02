use db::models::{event, registration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterReq {
    pub event_id: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct AdmissionResponse {
    pub registration_id: i64,
    pub status: String,
    pub waitlist_position: Option<i32>,
}

impl From<registration::Model> for AdmissionResponse {
    fn from(r: registration::Model) -> Self {
        Self {
            registration_id: r.id,
            status: r.status.to_string(),
            waitlist_position: r.waitlist_position,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MyRegistrationResponse {
    pub registration_id: i64,
    pub status: registration::Status,
    pub waitlist_position: Option<i32>,
    pub registered_at: String,
    pub event: Option<MyRegistrationEvent>,
}

#[derive(Debug, Serialize)]
pub struct MyRegistrationEvent {
    pub id: i64,
    pub title: String,
    pub event_date: String,
    pub venue: String,
    pub status: event::Status,
}

impl MyRegistrationResponse {
    pub fn from_pair(r: registration::Model, e: Option<event::Model>) -> Self {
        Self {
            registration_id: r.id,
            status: r.status,
            waitlist_position: r.waitlist_position,
            registered_at: r.created_at.to_rfc3339(),
            event: e.map(|e| MyRegistrationEvent {
                id: e.id,
                title: e.title,
                event_date: e.event_date.to_rfc3339(),
                venue: e.venue,
                status: e.status,
            }),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct CancelResponse {
    /// Student promoted off the waitlist head, if the cancellation freed a
    /// confirmed slot.
    pub promoted_student_id: Option<i64>,
}

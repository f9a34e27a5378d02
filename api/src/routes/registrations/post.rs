use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::{
    event,
    registration::{self, AdmissionError},
};
use util::state::AppState;

use super::common::{AdmissionResponse, RegisterReq};
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// POST /api/registrations
///
/// Register the calling student for an event. While confirmed capacity
/// remains the registration is `registered`; afterwards it is `waitlisted`
/// with a 1-based position in arrival order.
///
/// ### Request Body
/// ```json
/// { "event_id": 7 }
/// ```
///
/// ### Responses
/// - `201 Created` →
/// ```json
/// {
///   "success": true,
///   "data": { "registration_id": 3, "status": "waitlisted", "waitlist_position": 1 },
///   "message": "Added to waitlist"
/// }
/// ```
/// - `400 Bad Request` — event not open for registration.
/// - `404 Not Found` — event absent or in another college.
/// - `409 Conflict` — caller already holds a non-cancelled registration.
pub async fn register_for_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<RegisterReq>,
) -> (StatusCode, Json<ApiResponse<AdmissionResponse>>) {
    let db = app_state.db();

    let found = match event::Model::find_in_college(db, req.event_id, user.college_id).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Event not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, event_id = req.event_id, "Failed to load event");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match registration::Model::admit(db, &found, user.id).await {
        Ok(created) => {
            let message = match created.status {
                registration::Status::Registered => "Registered for event",
                _ => "Added to waitlist",
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(AdmissionResponse::from(created), message)),
            )
        }
        Err(AdmissionError::EventClosed) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Event is not open for registration")),
        ),
        Err(AdmissionError::Duplicate) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error(
                "You already have a registration for this event",
            )),
        ),
        Err(AdmissionError::Db(e)) => {
            tracing::error!(error = %e, event_id = req.event_id, "Admission failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

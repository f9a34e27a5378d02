use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use db::models::event;
use util::state::AppState;

use super::common::{CreateEventReq, CreatedEventResponse};
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// POST /api/events
///
/// Create an event in the caller's college. A fresh QR secret is minted for
/// the event; fetch it via `GET /events/{id}/qr`.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Spring Gala",
///   "event_date": "2026-09-01T18:00:00Z",
///   "venue": "Grand Hall",
///   "capacity": 150,
///   "category": "social"
/// }
/// ```
/// `max_participants` is accepted as an alias for `capacity`.
///
/// ### Responses
/// - `201 Created` → `{ "event_id": 7 }`
/// - `400 Bad Request` — missing/invalid fields.
pub async fn create_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateEventReq>,
) -> (StatusCode, Json<ApiResponse<CreatedEventResponse>>) {
    if req.title.trim().is_empty() || req.venue.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Title and venue are required")),
        );
    }

    let Ok(event_date) = req.event_date.parse::<DateTime<Utc>>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "event_date must be an RFC 3339 timestamp",
            )),
        );
    };

    let capacity = match req.capacity.or(req.max_participants) {
        Some(c) if c >= 0 => c,
        Some(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("capacity must not be negative")),
            );
        }
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("capacity is required")),
            );
        }
    };

    let status = if req.draft.unwrap_or(false) {
        event::Status::Draft
    } else {
        event::Status::Active
    };

    match event::Model::create(
        app_state.db(),
        user.college_id,
        user.id,
        req.title.trim(),
        req.description.as_deref(),
        req.category.as_deref(),
        event_date,
        req.venue.trim(),
        capacity,
        status,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CreatedEventResponse {
                    event_id: created.id,
                },
                "Event created",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create event");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

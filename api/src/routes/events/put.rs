use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use db::models::{event, user::Role};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, IntoActiveModel};
use util::state::AppState;

use super::common::EditEventReq;
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// PUT /api/events/{event_id}
///
/// Edit event fields and/or advance its lifecycle status. Only the owning
/// admin (or a super admin) may edit. Status changes must follow
/// draft → active → completed, with cancellation allowed from any
/// non-terminal state.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` — illegal status transition or malformed field.
/// - `403 Forbidden` — not the owner.
/// - `404 Not Found`
pub async fn edit_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<i64>,
    Json(req): Json<EditEventReq>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let db = app_state.db();

    let found = match event::Model::find_in_college(db, event_id, user.college_id).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Event not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, event_id, "Failed to load event");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    if found.created_by != user.id && user.role != Role::SuperAdmin {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Only the event owner may edit this event")),
        );
    }

    if let Some(next) = &req.status {
        if !found.status.can_transition_to(next) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Cannot change status from {} to {}",
                    found.status, next
                ))),
            );
        }
    }

    let event_date = match &req.event_date {
        Some(raw) => match raw.parse::<DateTime<Utc>>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "event_date must be an RFC 3339 timestamp",
                    )),
                );
            }
        },
        None => None,
    };

    if let Some(capacity) = req.capacity {
        if capacity < 0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("capacity must not be negative")),
            );
        }
    }

    let mut active = found.into_active_model();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(category) = req.category {
        active.category = Set(Some(category));
    }
    if let Some(date) = event_date {
        active.event_date = Set(date);
    }
    if let Some(venue) = req.venue {
        active.venue = Set(venue);
    }
    if let Some(capacity) = req.capacity {
        active.capacity = Set(capacity);
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Event updated")),
        ),
        Err(e) => {
            tracing::error!(error = %e, event_id, "Failed to update event");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{event, user::Role};
use sea_orm::ModelTrait;
use util::state::AppState;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// DELETE /api/events/{event_id}
///
/// Delete an event. Registrations, attendance, feedback, and notes cascade
/// via their foreign keys. Only the owning admin (or a super admin) may
/// delete.
///
/// ### Responses
/// - `200 OK`
/// - `403 Forbidden` — not the owner.
/// - `404 Not Found`
pub async fn delete_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<i64>,
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
            Json(ApiResponse::error(
                "Only the event owner may delete this event",
            )),
        );
    }

    match found.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Event deleted")),
        ),
        Err(e) => {
            tracing::error!(error = %e, event_id, "Failed to delete event");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

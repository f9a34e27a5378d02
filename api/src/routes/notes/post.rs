use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::{event, note, registration};
use serde::Deserialize;
use util::state::AppState;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct UpsertNoteReq {
    pub event_id: i64,
    pub content: String,
}

/// POST /api/notes
///
/// Create or replace the caller's note on an event. You may annotate what
/// you registered for — a non-cancelled registration is required,
/// attendance is not.
///
/// ### Responses
/// - `200 OK` — message distinguishes "Note created" / "Note updated".
/// - `400 Bad Request` — empty content, or no registration for the event.
/// - `404 Not Found`
pub async fn upsert_note(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UpsertNoteReq>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    if req.content.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Note content is required")),
        );
    }

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

    match registration::Model::find_active(db, found.id, user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Notes require a registration for the event",
                )),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to check registration");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match note::Model::upsert(db, found.id, user.id, user.college_id, req.content.trim()).await {
        Ok((_, created)) => {
            let message = if created { "Note created" } else { "Note updated" };
            (StatusCode::OK, Json(ApiResponse::success((), message)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to upsert note");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

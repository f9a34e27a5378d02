use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{event, note};
use serde::Serialize;
use util::state::AppState;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub event_id: i64,
    pub content: String,
    pub updated_at: String,
}

/// GET /api/notes/event/{event_id}
///
/// The caller's note on an event, or `null` if none exists.
pub async fn get_note(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Option<NoteResponse>>>) {
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

    match note::Model::find_for_student(db, found.id, user.id).await {
        Ok(note) => {
            let response = note.map(|n| NoteResponse {
                id: n.id,
                event_id: n.event_id,
                content: n.content,
                updated_at: n.updated_at.to_rfc3339(),
            });
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Note retrieved")),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, event_id, "Failed to load note");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

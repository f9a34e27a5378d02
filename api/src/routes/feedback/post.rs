use axum::{Extension, Json, extract::State, http::StatusCode};
use common::format_validation_errors;
use db::models::{attendance, event, feedback};
use util::state::AppState;
use validator::Validate;

use super::common::{CreateFeedbackReq, CreatedFeedbackResponse};
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// POST /api/feedback
///
/// Rate an attended event. You may only rate what you attended: a prior
/// attendance record is required, and each student holds at most one
/// feedback row per event.
///
/// ### Request Body
/// ```json
/// { "event_id": 7, "rating": 4, "comments": "Great talk", "anonymous": false }
/// ```
///
/// ### Responses
/// - `201 Created` → `{ "feedback_id": 9 }`
/// - `400 Bad Request` — rating out of range, or no attendance on record.
/// - `404 Not Found` — event absent from the caller's college.
/// - `409 Conflict` — feedback already submitted.
pub async fn create_feedback(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateFeedbackReq>,
) -> (StatusCode, Json<ApiResponse<CreatedFeedbackResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
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

    match attendance::Model::exists(db, found.id, user.id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Feedback requires attendance at the event",
                )),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to check attendance");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match feedback::Model::find_for_student(db, found.id, user.id).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "Feedback already submitted for this event",
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to check existing feedback");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match feedback::Model::create(
        db,
        found.id,
        user.id,
        user.college_id,
        req.rating,
        req.comments.as_deref(),
        req.anonymous.unwrap_or(false),
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CreatedFeedbackResponse {
                    feedback_id: created.id,
                },
                "Feedback submitted",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create feedback");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::registration::{self, CancelError};
use util::state::AppState;

use super::common::CancelResponse;
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// DELETE /api/registrations/{registration_id}
///
/// Cancel the calling student's registration. Cancelling a confirmed
/// registration promotes the waitlist head into the freed slot; waitlist
/// positions are re-packed so they stay dense.
///
/// ### Responses
/// - `200 OK` → `{ "promoted_student_id": 12 | null }`
/// - `404 Not Found` — no such registration for this student.
/// - `409 Conflict` — already cancelled.
pub async fn cancel_registration(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(registration_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<CancelResponse>>) {
    match registration::Model::cancel(app_state.db(), registration_id, user.id).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CancelResponse {
                    promoted_student_id: outcome.promoted.map(|p| p.student_id),
                },
                "Registration cancelled",
            )),
        ),
        Err(CancelError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Registration not found")),
        ),
        Err(CancelError::AlreadyCancelled) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Registration is already cancelled")),
        ),
        Err(CancelError::Db(e)) => {
            tracing::error!(error = %e, registration_id, "Cancellation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::{
    attendance::{self, CheckInError},
    event, user,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use util::state::AppState;

use super::common::{ManualMarkReq, QrCheckInReq, QrData};
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// POST /api/attendance/manual
///
/// Admin-initiated attendance mark. The student must hold a confirmed
/// (`registered`) registration for the event; waitlisted or cancelled
/// registrations are rejected.
///
/// ### Request Body
/// ```json
/// { "event_id": 7, "student_id": 12 }
/// ```
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` — student is not registered for the event.
/// - `404 Not Found` — event or student absent from the admin's college.
/// - `409 Conflict` — attendance already recorded.
pub async fn mark_manual(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ManualMarkReq>,
) -> (StatusCode, Json<ApiResponse<()>>) {
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

    // The student must exist inside the admin's own college.
    let student = user::Entity::find()
        .filter(user::Column::Id.eq(req.student_id))
        .filter(user::Column::CollegeId.eq(user.college_id))
        .one(db)
        .await;
    match student {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Student not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, student_id = req.student_id, "Failed to load student");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    }

    match attendance::Model::mark_manual(db, &found, req.student_id, user.id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Attendance recorded")),
        ),
        Err(CheckInError::NotRegistered) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Student is not registered for this event",
            )),
        ),
        Err(CheckInError::AlreadyCheckedIn) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Attendance already recorded")),
        ),
        Err(CheckInError::InvalidProof) => (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Invalid check-in")),
        ),
        Err(CheckInError::Db(e)) => {
            tracing::error!(error = %e, "Manual attendance mark failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

/// POST /api/attendance/qr-checkin
///
/// Student self-check-in with a scanned QR payload. The payload must match
/// the stored event on event id, secret, and college; any single mismatch
/// fails identically so a probing client cannot learn which field was
/// wrong.
///
/// ### Request Body
/// ```json
/// { "qr_data": "{\"event_id\":7,\"secret\":\"...\",\"college_id\":1}" }
/// ```
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` — `qr_data` is not valid JSON.
/// - `403 Forbidden` — proof mismatch.
/// - `409 Conflict` — already checked in.
pub async fn qr_check_in(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<QrCheckInReq>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    let Ok(data) = serde_json::from_str::<QrData>(&req.qr_data) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("qr_data is not a valid QR payload")),
        );
    };

    match attendance::Model::check_in_qr(
        app_state.db(),
        user.college_id,
        user.id,
        data.event_id,
        &data.secret,
        data.college_id,
    )
    .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Checked in")),
        ),
        Err(CheckInError::InvalidProof) => (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Invalid QR code")),
        ),
        Err(CheckInError::AlreadyCheckedIn) => (
            StatusCode::CONFLICT,
            Json(ApiResponse::error("Attendance already recorded")),
        ),
        Err(CheckInError::NotRegistered) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Not registered for this event")),
        ),
        Err(CheckInError::Db(e)) => {
            tracing::error!(error = %e, "QR check-in failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{attendance, event, user};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use util::state::AppState;

use super::common::AttendanceRow;
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// GET /api/attendance/event/{event_id}
///
/// Attendance roster for a tenant-scoped event, with student identity
/// attached to each row.
///
/// ### Responses
/// - `200 OK` → `[{ "student_id": ..., "taken_at": ..., ... }]`
/// - `404 Not Found`
pub async fn event_attendance(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<AttendanceRow>>>) {
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

    let rows = attendance::Entity::find()
        .filter(attendance::Column::EventId.eq(found.id))
        .find_also_related(user::Entity)
        .all(db)
        .await;

    match rows {
        Ok(rows) => {
            let response: Vec<AttendanceRow> = rows
                .into_iter()
                .map(|(record, student)| AttendanceRow {
                    student_id: record.student_id,
                    student_name: student
                        .as_ref()
                        .map(|s| format!("{} {}", s.first_name, s.last_name)),
                    student_number: student.and_then(|s| s.student_number),
                    taken_at: record.taken_at.to_rfc3339(),
                    marked_by: record.marked_by,
                })
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Attendance retrieved")),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, event_id, "Failed to list attendance");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

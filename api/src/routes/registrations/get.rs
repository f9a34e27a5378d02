use axum::{Extension, Json, extract::State, http::StatusCode};
use db::models::registration;
use util::state::AppState;

use super::common::MyRegistrationResponse;
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// GET /api/registrations/my
///
/// All of the calling student's registrations (including cancelled ones),
/// newest first, each with its event summary.
pub async fn my_registrations(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> (StatusCode, Json<ApiResponse<Vec<MyRegistrationResponse>>>) {
    match registration::Model::list_for_student(app_state.db(), user.id).await {
        Ok(rows) => {
            let response: Vec<MyRegistrationResponse> = rows
                .into_iter()
                .map(|(r, e)| MyRegistrationResponse::from_pair(r, e))
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Registrations retrieved")),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, student_id = user.id, "Failed to list registrations");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

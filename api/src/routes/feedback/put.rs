use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use common::format_validation_errors;
use db::models::feedback::{self, FeedbackPatch};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use util::state::AppState;
use validator::Validate;

use super::common::UpdateFeedbackReq;
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// PUT /api/feedback/{feedback_id}
///
/// Update any subset of rating/comments/anonymous on the caller's own
/// feedback. Fields absent from the body are left untouched.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` — empty patch or rating out of range.
/// - `404 Not Found` — no such feedback owned by the caller.
pub async fn update_feedback(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(feedback_id): Path<i64>,
    Json(req): Json<UpdateFeedbackReq>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let patch = FeedbackPatch {
        rating: req.rating,
        comments: req.comments,
        anonymous: req.anonymous,
    };
    if patch.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No fields to update")),
        );
    }

    let db = app_state.db();

    // Ownership check: the row must belong to the calling student.
    let found = feedback::Entity::find()
        .filter(feedback::Column::Id.eq(feedback_id))
        .filter(feedback::Column::StudentId.eq(user.id))
        .one(db)
        .await;

    let found = match found {
        Ok(Some(found)) => found,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Feedback not found")),
            );
        }
        Err(e) => {
            tracing::error!(error = %e, feedback_id, "Failed to load feedback");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    match feedback::Model::apply_patch(db, found, patch).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Feedback updated")),
        ),
        Err(e) => {
            tracing::error!(error = %e, feedback_id, "Failed to update feedback");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

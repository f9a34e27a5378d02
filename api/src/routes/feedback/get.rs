use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{event, feedback};
use util::state::AppState;

use super::common::{EventFeedbackResponse, FeedbackRow, FeedbackSummary};
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

/// GET /api/feedback/event/{event_id}
///
/// All feedback for a tenant-scoped event plus a summary (average rating
/// and 1-5 distribution). Rows marked anonymous carry no student id.
///
/// ### Responses
/// - `200 OK` → `{ "feedback": [...], "summary": { "average_rating": 4.2, "distribution": [0,1,2,5,4] } }`
/// - `404 Not Found`
pub async fn event_feedback(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<EventFeedbackResponse>>) {
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

    let rows = match feedback::Model::for_event(db, found.id).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, event_id, "Failed to list feedback");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let mut distribution = [0u64; 5];
    let mut sum = 0i64;
    for row in &rows {
        if (1..=5).contains(&row.rating) {
            distribution[(row.rating - 1) as usize] += 1;
        }
        sum += row.rating as i64;
    }
    let average_rating = if rows.is_empty() {
        0.0
    } else {
        sum as f64 / rows.len() as f64
    };

    let response = EventFeedbackResponse {
        feedback: rows.into_iter().map(FeedbackRow::from).collect(),
        summary: FeedbackSummary {
            average_rating: (average_rating * 100.0).round() / 100.0,
            distribution,
        },
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Feedback retrieved")),
    )
}

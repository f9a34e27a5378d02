//! `/reports` route group — admin-only, read-only aggregation.
//!
//! Every report is implicitly scoped to the caller's college; no endpoint
//! accepts a tenant id.

use crate::auth::guards::allow_admin;
use axum::{Router, middleware::from_fn_with_state, routing::get};
use util::state::AppState;

pub mod common;
pub mod get;

pub fn report_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/event-popularity", get(get::event_popularity))
        .route("/student-participation", get(get::student_participation))
        .route("/leaderboard", get(get::leaderboard))
        .route("/top-students", get(get::top_students))
        .route("/attendance-percentage", get(get::attendance_percentage))
        .route("/average-feedback", get(get::average_feedback))
        .route_layer(from_fn_with_state(app_state, allow_admin))
}

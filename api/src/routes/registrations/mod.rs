//! `/registrations` route group — student-only.
//!
//! Admission into events (confirmed or waitlisted), the caller's own
//! registration list, and cancellation.

use crate::auth::guards::allow_student;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

pub fn registration_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(post::register_for_event))
        .route("/my", get(get::my_registrations))
        .route("/{registration_id}", delete(delete::cancel_registration))
        .route_layer(from_fn_with_state(app_state, allow_student))
}

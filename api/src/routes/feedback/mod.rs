//! `/feedback` route group.
//!
//! Students rate events they attended (one rating per event, editable);
//! admins read per-event feedback with a rating summary.

use crate::auth::guards::{allow_admin, allow_student};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

pub fn feedback_routes(app_state: AppState) -> Router<AppState> {
    let student = Router::new()
        .route("/", post(post::create_feedback))
        .route("/{feedback_id}", put(put::update_feedback))
        .route_layer(from_fn_with_state(app_state.clone(), allow_student));

    let admin = Router::new()
        .route("/event/{event_id}", get(get::event_feedback))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    student.merge(admin)
}

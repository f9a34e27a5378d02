//! `/notes` route group — student-only private notes, one per event.

use crate::auth::guards::allow_student;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

pub fn note_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(post::upsert_note))
        .route("/event/{event_id}", get(get::get_note))
        .route_layer(from_fn_with_state(app_state, allow_student))
}

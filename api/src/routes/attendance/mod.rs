//! `/attendance` route group.
//!
//! Two check-in paths produce the same attendance fact: admins mark
//! registered students manually; students check themselves in with the
//! event's QR payload.

use crate::auth::guards::{allow_admin, allow_student};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;

pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/manual", post(post::mark_manual))
        .route("/event/{event_id}", get(get::event_attendance))
        .route_layer(from_fn_with_state(app_state.clone(), allow_admin));

    let student = Router::new()
        .route("/qr-checkin", post(post::qr_check_in))
        .route_layer(from_fn_with_state(app_state, allow_student));

    admin.merge(student)
}

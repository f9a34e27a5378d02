//! `/events` route group.
//!
//! Reads are open to any authenticated member of the tenant; writes are
//! admin-only, with ownership enforced in the handlers.

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn event_routes(app_state: AppState) -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(get::get_events))
        .route("/{event_id}", get(get::get_event))
        .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated));

    let writes = Router::new()
        .route("/", post(post::create_event))
        .route("/{event_id}", put(put::edit_event))
        .route("/{event_id}", delete(delete::delete_event))
        .route("/{event_id}/qr", get(get::get_event_qr))
        .route_layer(from_fn_with_state(app_state, allow_admin));

    reads.merge(writes)
}

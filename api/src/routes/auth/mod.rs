use axum::{Router, routing::post};
use post::{login, register_admin, register_student};
use util::state::AppState;

pub mod post;

/// `/auth` route group. All endpoints are public.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/student", post(register_student))
        .route("/register/admin", post(register_admin))
        .route("/login", post(login))
}

//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected by the appropriate
//! access-control middleware:
//! - `/health` → health check (public)
//! - `/auth` → registration and login (public)
//! - `/events` → event listing and CRUD (reads: any authenticated role;
//!   writes: admins)
//! - `/registrations` → admission, waitlist, cancellation (students)
//! - `/attendance` → manual marking (admins) and QR self-check-in (students)
//! - `/feedback` → ratings (students) and per-event summaries (admins)
//! - `/notes` → per-event student notes
//! - `/reports` → aggregation reports (admins)

use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, events::event_routes,
    feedback::feedback_routes, health::health_routes, notes::note_routes,
    registrations::registration_routes, reports::report_routes,
};
use axum::Router;
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod events;
pub mod feedback;
pub mod health;
pub mod notes;
pub mod registrations;
pub mod reports;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router has `AppState` as its state type and mounts all
/// route groups under their base paths. Guards are attached per group; no
/// endpoint accepts a caller-supplied tenant — every protected handler works
/// with the tenant the identity guard derived from the live account row.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/events", event_routes(app_state.clone()))
        .nest("/registrations", registration_routes(app_state.clone()))
        .nest("/attendance", attendance_routes(app_state.clone()))
        .nest("/feedback", feedback_routes(app_state.clone()))
        .nest("/notes", note_routes(app_state.clone()))
        .nest("/reports", report_routes(app_state.clone()))
        .with_state(app_state)
}

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::{event, registration};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use util::state::AppState;

use super::common::{
    EventDetailResponse, EventResponse, ListQuery, ListResponse, Pagination, QrPayload,
    UserRegistration,
};
use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// GET /api/events
///
/// Tenant-scoped event listing with optional `status` and `category`
/// filters and `limit`/`offset` pagination.
///
/// ### Responses
/// - `200 OK` → `{ "events": [...], "pagination": {...} }`
pub async fn get_events(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let filter = event::EventFilter {
        status: query.status,
        category: query.category,
        limit: query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        offset: query.offset.unwrap_or(0),
    };

    match event::Model::list(app_state.db(), user.college_id, &filter).await {
        Ok((events, total)) => {
            let response = ListResponse {
                events: events.into_iter().map(EventResponse::from).collect(),
                pagination: Pagination {
                    total,
                    limit: filter.limit,
                    offset: filter.offset,
                },
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Events retrieved")),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list events");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

/// GET /api/events/{event_id}
///
/// Event detail with the current confirmed-registration count. Students
/// additionally receive their own registration as `user_registration`.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` — absent, or belongs to another college.
pub async fn get_event(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<EventDetailResponse>>) {
    let db = app_state.db();

    let found = match event::Model::find_in_college(db, event_id, user.college_id).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(error = %e, event_id, "Failed to load event");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let Some(found) = found else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Event not found")),
        );
    };

    let registered_count = registration::Entity::find()
        .filter(registration::Column::EventId.eq(found.id))
        .filter(registration::Column::Status.eq(registration::Status::Registered))
        .count(db)
        .await
        .unwrap_or(0);

    let user_registration = if user.role.is_student() {
        registration::Model::find_active(db, found.id, user.id)
            .await
            .ok()
            .flatten()
            .map(UserRegistration::from)
    } else {
        None
    };

    let response = EventDetailResponse {
        event: Some(EventResponse::from(found)),
        registered_count,
        user_registration,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Event retrieved")),
    )
}

/// GET /api/events/{event_id}/qr
///
/// The QR check-in payload for display at the venue. Only the owning admin
/// (or a super admin) may read it — the secret admits anyone who presents
/// it.
///
/// ### Responses
/// - `200 OK` → `{ "event_id": ..., "secret": "...", "college_id": ... }`
/// - `403 Forbidden` — admin does not own the event.
/// - `404 Not Found`
pub async fn get_event_qr(
    State(app_state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(event_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<QrPayload>>) {
    let found = match event::Model::find_in_college(app_state.db(), event_id, user.college_id).await
    {
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

    if found.created_by != user.id && user.role != db::models::user::Role::SuperAdmin {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Only the event owner may view its QR code")),
        );
    }

    let payload = QrPayload {
        event_id: found.id,
        secret: found.qr_secret,
        college_id: found.college_id,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(payload, "QR payload retrieved")),
    )
}

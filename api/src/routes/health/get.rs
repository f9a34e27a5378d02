use crate::response::ApiResponse;
use axum::{Json, http::StatusCode};

/// GET /api/health
///
/// Liveness probe. Returns 200 with a static payload.
pub async fn health_check() -> (StatusCode, Json<ApiResponse<&'static str>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success("OK", "Health check passed")),
    )
}

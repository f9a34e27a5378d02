use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::{self, Role};
use sea_orm::EntityTrait;
use util::state::AppState;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// The identity every protected handler works with. Role and tenant come
/// from the live account row, not from the token, so deactivated or
/// transferred accounts lose access immediately.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
    pub college_id: i64,
}

type GuardError = (StatusCode, Json<ApiResponse<Empty>>);

/// Decodes the bearer token, re-derives the account from the database, and
/// inserts a `CurrentUser` into request extensions.
///
/// 401 for a missing/invalid token; 403 for an account that no longer exists
/// or has been deactivated — even if the token itself has not expired.
async fn resolve_identity(
    state: &AppState,
    mut req: Request<Body>,
) -> Result<(Request<Body>, CurrentUser), GuardError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;
    req = Request::from_parts(parts, body);

    let account = user::Entity::find_by_id(user.0.sub)
        .one(state.db())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = user.0.sub, "DB error while resolving identity");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        })?;

    let account = match account {
        Some(a) if a.active => a,
        // Missing and deactivated accounts are rejected identically.
        _ => {
            return Err((
                StatusCode::FORBIDDEN,
                Json(ApiResponse::error("Account is inactive or unknown")),
            ));
        }
    };

    let current = CurrentUser {
        id: account.id,
        role: account.role,
        college_id: account.college_id,
    };
    req.extensions_mut().insert(current.clone());
    Ok((req, current))
}

/// Basic guard: any authenticated, active account.
pub async fn allow_authenticated(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, _user) = resolve_identity(&app_state, req).await?;
    Ok(next.run(req).await)
}

/// Student-only guard.
pub async fn allow_student(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, user) = resolve_identity(&app_state, req).await?;

    if !user.role.is_student() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Student access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Admin guard: admins and super admins.
pub async fn allow_admin(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, user) = resolve_identity(&app_state, req).await?;

    if !user.role.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

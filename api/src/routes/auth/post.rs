use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{format_validation_errors, validation_error_fields};
use db::models::{college, user};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;

lazy_static::lazy_static! {
    static ref STUDENT_NUMBER_REGEX: regex::Regex =
        regex::Regex::new("^[A-Za-z0-9]{4,16}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(regex(
        path = *STUDENT_NUMBER_REGEX,
        message = "Student number must be 4-16 alphanumeric characters"
    ))]
    pub student_number: String,

    pub college_id: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct RegisteredResponse {
    pub id: i64,
}

/// POST /auth/register/student
///
/// Register a new student account.
///
/// ### Request Body
/// ```json
/// {
///   "email": "user@example.com",
///   "password": "strongpassword",
///   "first_name": "Ada",
///   "last_name": "Lovelace",
///   "student_number": "S1234567",
///   "college_id": 1
/// }
/// ```
///
/// ### Responses
/// - `201 Created` → `{ "id": 42 }`
/// - `400 Bad Request` (validation failure or unknown college)
/// - `409 Conflict` (email already in use)
pub async fn register_student(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterStudentRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_failure(&errors);
    }
    register(
        &app_state,
        RegisterFields {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            student_number: Some(req.student_number),
            college_id: req.college_id,
            role: user::Role::Student,
        },
    )
    .await
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAdminRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    pub college_id: i64,
}

/// POST /auth/register/admin
///
/// Register a new admin account. Same shape as student registration minus
/// the student number.
pub async fn register_admin(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterAdminRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_failure(&errors);
    }
    register(
        &app_state,
        RegisterFields {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            student_number: None,
            college_id: req.college_id,
            role: user::Role::Admin,
        },
    )
    .await
}

struct RegisterFields {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    student_number: Option<String>,
    college_id: i64,
    role: user::Role,
}

/// 400 with the flattened message and per-field detail in `data`.
fn validation_failure(errors: &validator::ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error_with(
            validation_error_fields(errors),
            format_validation_errors(errors),
        )),
    )
        .into_response()
}

async fn register(app_state: &AppState, fields: RegisterFields) -> Response {
    let db = app_state.db();

    match college::Model::exists(db, fields.college_id).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<RegisteredResponse>::error("Unknown college")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "DB error while checking college");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<RegisteredResponse>::error("Database error")),
            )
                .into_response();
        }
    }

    match user::Model::find_by_email(db, &fields.email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<RegisteredResponse>::error(
                    "A user with this email already exists",
                )),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "DB error while checking email");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<RegisteredResponse>::error("Database error")),
            )
                .into_response();
        }
    }

    match user::Model::create(
        db,
        fields.college_id,
        &fields.email,
        &fields.password,
        &fields.first_name,
        &fields.last_name,
        fields.student_number.as_deref(),
        fields.role,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                RegisteredResponse { id: created.id },
                "Account registered successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create account");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<RegisteredResponse>::error("Database error")),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub user: LoginUser,
}

/// POST /auth/login
///
/// Authenticate an account and issue a JWT with a fixed validity window.
///
/// ### Responses
/// - `200 OK` → `{ "token": "...", "expires_at": "...", "user": {...} }`
/// - `401 Unauthorized` — unknown email and wrong password answer
///   identically.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(error_message)),
        );
    }

    match user::Model::verify_credentials(app_state.db(), &req.email, &req.password).await {
        Ok(Some(user)) => {
            let (token, expires_at) = generate_jwt(&user);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    LoginResponse {
                        token,
                        expires_at,
                        user: LoginUser {
                            id: user.id,
                            email: user.email,
                            role: user.role.to_string(),
                        },
                    },
                    "Login successful",
                )),
            )
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid email or password")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "DB error during login");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            )
        }
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use super::into_new_phones;
use super::ApiError;
use super::ApiErrorData;
use super::ApiSuccess;
use super::PhoneRequest;
use super::UserResponseData;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Register a user under the users prefix.
#[utoipa::path(
    post,
    path = "/api/usuarios/create",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponseData),
        (status = 400, description = "Email or password has an invalid format", body = ApiErrorData),
        (status = 409, description = "Email already registered", body = ApiErrorData),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    state
        .user_service
        .register(body.into())
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// Same registration, exposed next to login for self sign-up.
#[utoipa::path(
    post,
    path = "/api/auth/create",
    tag = "auth",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponseData),
        (status = 400, description = "Email or password has an invalid format", body = ApiErrorData),
        (status = 409, description = "Email already registered", body = ApiErrorData),
    )
)]
pub async fn auth_create_user(
    state: State<AppState>,
    body: Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    create_user(state, body).await
}

/// HTTP request body for registering a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "correo")]
    email: String,
    password: String,
    #[serde(rename = "telefonos", default)]
    phones: Option<Vec<PhoneRequest>>,
}

impl From<CreateUserRequest> for RegisterUserCommand {
    fn from(body: CreateUserRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            phones: into_new_phones(body.phones),
        }
    }
}

use axum::extract::Path;
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
use crate::domain::user::models::FullUpdateCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Replace every mutable field of a user, phones included.
#[utoipa::path(
    put,
    path = "/api/usuarios/update/{id}",
    tag = "users",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponseData),
        (status = 400, description = "Invalid id or field format", body = ApiErrorData),
        (status = 401, description = "Missing or rejected token", body = ApiErrorData),
        (status = 404, description = "No such user", body = ApiErrorData),
        (status = 409, description = "Email belongs to another user", body = ApiErrorData),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    tracing::debug!(user_id = %user_id, requested_by = %caller.email, "Full update requested");

    state
        .user_service
        .full_update(&user_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// HTTP request body for a full update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "correo")]
    email: String,
    password: String,
    #[serde(rename = "activo", default = "active_by_default")]
    active: bool,
    #[serde(rename = "telefonos", default)]
    phones: Option<Vec<PhoneRequest>>,
}

fn active_by_default() -> bool {
    true
}

impl From<UpdateUserRequest> for FullUpdateCommand {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            active: body.active,
            phones: into_new_phones(body.phones),
        }
    }
}

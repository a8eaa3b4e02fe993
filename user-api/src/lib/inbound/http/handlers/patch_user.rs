use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;
use utoipa::ToSchema;

use super::ApiError;
use super::ApiErrorData;
use super::ApiSuccess;
use super::PhoneRequest;
use super::UserResponseData;
use crate::domain::user::models::NewPhone;
use crate::domain::user::models::PatchUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPatchField;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Apply a subset of fields. Keys outside the known set are rejected.
#[utoipa::path(
    patch,
    path = "/api/usuarios/patch/{id}",
    tag = "users",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "User id")),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "User patched", body = UserResponseData),
        (status = 400, description = "Unknown field or wrong value type", body = ApiErrorData),
        (status = 401, description = "Missing or rejected token", body = ApiErrorData),
        (status = 404, description = "No such user", body = ApiErrorData),
        (status = 409, description = "Email belongs to another user", body = ApiErrorData),
    )
)]
pub async fn patch_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    Json(PatchUserRequest(body)): Json<PatchUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = parse_patch(body)?;
    tracing::debug!(
        user_id = %user_id,
        requested_by = %caller.email,
        fields = command.fields.len(),
        "Patch requested"
    );

    state
        .user_service
        .patch(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|view| ApiSuccess::new(StatusCode::OK, view.into()))
}

/// Any subset of `nombre`, `correo`, `password`, `activo` and `telefonos`.
///
/// Kept as a raw object so unknown keys can be reported by name.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct PatchUserRequest(pub Map<String, Value>);

fn parse_patch(body: Map<String, Value>) -> Result<PatchUserCommand, UserError> {
    let fields = body
        .into_iter()
        .map(|(key, value)| parse_field(&key, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PatchUserCommand { fields })
}

fn parse_field(key: &str, value: Value) -> Result<UserPatchField, UserError> {
    match key {
        "nombre" => field_value(key, value).map(UserPatchField::Name),
        "correo" => field_value(key, value).map(UserPatchField::Email),
        "password" => field_value(key, value).map(UserPatchField::Password),
        "activo" => field_value(key, value).map(UserPatchField::Active),
        "telefonos" => field_value::<Vec<PhoneRequest>>(key, value)
            .map(|phones| UserPatchField::Phones(phones.into_iter().map(NewPhone::from).collect())),
        other => Err(UserError::UnknownField(other.to_string())),
    }
}

fn field_value<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, UserError> {
    serde_json::from_value(value)
        .map_err(|e| UserError::InvalidFormat(format!("Invalid value for '{}': {}", key, e)))
}

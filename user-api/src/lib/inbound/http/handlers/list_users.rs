use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiErrorData;
use super::ApiSuccess;
use super::UserResponseData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/usuarios/findAll",
    tag = "users",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All users", body = [UserResponseData]),
        (status = 401, description = "Missing or rejected token", body = ApiErrorData),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
) -> Result<ApiSuccess<Vec<UserResponseData>>, ApiError> {
    tracing::debug!(requested_by = %caller.email, "Listing users");

    state
        .user_service
        .list()
        .await
        .map_err(ApiError::from)
        .map(|views| {
            ApiSuccess::new(
                StatusCode::OK,
                views.into_iter().map(UserResponseData::from).collect(),
            )
        })
}

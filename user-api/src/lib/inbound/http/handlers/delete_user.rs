use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiErrorData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

#[utoipa::path(
    delete,
    path = "/api/usuarios/delete/{id}",
    tag = "users",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or rejected token", body = ApiErrorData),
        (status = 404, description = "No such user", body = ApiErrorData),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    let existed = state.user_service.delete(&user_id).await?;
    if !existed {
        return Err(UserError::NotFound(user_id.to_string()).into());
    }

    tracing::debug!(user_id = %user_id, requested_by = %caller.email, "User removed over http");
    Ok(StatusCode::NO_CONTENT)
}

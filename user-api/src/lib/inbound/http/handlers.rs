use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::user::models::NewPhone;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;

pub mod create_user;
pub mod delete_user;
pub mod list_users;
pub mod login;
pub mod patch_user;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::UnknownUser(_) => ApiError::NotFound(err.to_string()),
            UserError::DuplicateEmail(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidFormat(_)
            | UserError::UnknownField(_)
            | UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public projection of a user as returned by every user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserResponseData {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "creado")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "modificado")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(rename = "ultimoLogin")]
    pub last_login: Option<DateTime<Utc>>,
    pub token: Option<String>,
    #[serde(rename = "isActive")]
    pub active: bool,
}

impl From<UserView> for UserResponseData {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id.to_string(),
            name: view.name,
            email: view.email,
            created_at: view.created_at,
            modified_at: view.modified_at,
            last_login: view.last_login,
            token: view.token,
            active: view.active,
        }
    }
}

/// Phone entry as sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct PhoneRequest {
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "codigoCiudad")]
    pub city_code: String,
    #[serde(rename = "codigoPais")]
    pub country_code: String,
}

impl From<PhoneRequest> for NewPhone {
    fn from(phone: PhoneRequest) -> Self {
        Self {
            number: phone.number,
            city_code: phone.city_code,
            country_code: phone.country_code,
        }
    }
}

pub(crate) fn into_new_phones(phones: Option<Vec<PhoneRequest>>) -> Vec<NewPhone> {
    phones
        .unwrap_or_default()
        .into_iter()
        .map(NewPhone::from)
        .collect()
}

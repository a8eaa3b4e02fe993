use std::net::SocketAddr;

use axum::async_trait;
use axum::extract::ConnectInfo;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Plain text body returned when a bearer token cannot be decoded.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid JWT token";

const BEARER_PREFIX: &str = "Bearer ";

/// Path prefixes that never go through token checks.
const PUBLIC_PATHS: &[&str] = &[
    "/api/auth/",
    "/api/usuarios/create",
    "/v3/api-docs",
    "/swagger-ui",
];

/// Identity established for the current request.
///
/// Lives in request extensions; never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub remote_addr: Option<SocketAddr>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|prefix| path.starts_with(prefix))
}

/// Token gate, run once per request.
///
/// Requests without a bearer header pass untouched and are left to the
/// handlers to reject. A token that does not decode ends the request with
/// 401. A decodable token whose subject is unknown, or whose expiry has
/// passed, passes without an identity.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if is_public_path(req.uri().path()) {
        return next.run(req).await;
    }

    let Some(token) = bearer_token(&req).map(str::to_owned) else {
        return next.run(req).await;
    };

    let subject = match state.authenticator.token_subject(&token) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting undecodable bearer token");
            return (StatusCode::UNAUTHORIZED, INVALID_TOKEN_MESSAGE).into_response();
        }
    };

    if req.extensions().get::<AuthenticatedUser>().is_some() {
        return next.run(req).await;
    }

    let user = match state.user_service.find_by_email(&subject).await {
        Ok(user) => user,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match user {
        Some(user) => match state.authenticator.is_token_valid(&token, &user.email) {
            Ok(true) => {
                let remote_addr = req
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| *addr);
                tracing::debug!(user_id = %user.id, "Bearer token accepted");
                req.extensions_mut().insert(AuthenticatedUser {
                    user_id: user.id,
                    email: user.email,
                    remote_addr,
                });
            }
            Ok(false) => tracing::debug!(user_id = %user.id, "Bearer token expired or mismatched"),
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting undecodable bearer token");
                return (StatusCode::UNAUTHORIZED, INVALID_TOKEN_MESSAGE).into_response();
            }
        },
        None => tracing::debug!(subject = %subject, "Bearer token names an unknown user"),
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/api/auth/create"));
        assert!(is_public_path("/api/usuarios/create"));
        assert!(is_public_path("/v3/api-docs"));
        assert!(is_public_path("/v3/api-docs/swagger-config"));
        assert!(is_public_path("/swagger-ui/index.html"));
    }

    #[test]
    fn test_protected_paths() {
        assert!(!is_public_path("/api/usuarios/findAll"));
        assert!(!is_public_path("/api/usuarios/delete/abc"));
        assert!(!is_public_path("/api/auth"));
        assert!(!is_public_path("/"));
    }

    #[test]
    fn test_bearer_token_extraction() {
        let req = http::Request::builder()
            .header(http::header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        let req = http::Request::builder()
            .header(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), None);

        let req = http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), None);
    }
}

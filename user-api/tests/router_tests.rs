mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use auth::JwtHandler;
use axum::body::Body;
use chrono::Utc;
use common::build_router;
use common::InMemoryUserRepository;
use common::JWT_SECRET;
use http::header;
use http::Request;
use http::StatusCode;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;
use user_api::domain::user::models::User;
use user_api::domain::user::models::UserId;
use user_api::domain::user::ports::UserRepository;
use user_api::inbound::http::middleware::AuthenticatedUser;

fn stored_user(email: &str) -> User {
    User {
        id: UserId::new(),
        name: "Ana".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$hash".to_string(),
        active: true,
        token: None,
        created_at: Utc::now(),
        modified_at: None,
        last_login: None,
        phones: Vec::new(),
    }
}

async fn seed(repository: &Arc<InMemoryUserRepository>, email: &str) -> String {
    repository.create(stored_user(email)).await.unwrap();
    JwtHandler::new(JWT_SECRET, common::token_ttl())
        .issue_with_claims(email, BTreeMap::new())
        .unwrap()
}

async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_valid_token_reaches_protected_handler() {
    let (router, repository) = build_router(false);
    let token = seed(&repository, "ana@example.com").await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/usuarios/findAll")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["data"][0]["correo"], "ana@example.com");
}

#[tokio::test]
async fn test_non_bearer_scheme_is_ignored() {
    let (router, repository) = build_router(false);
    seed(&repository, "ana@example.com").await;

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/usuarios/findAll")
                .header(header::AUTHORIZATION, "Basic YW5hOnNlY3JldA==")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Falls through to the handler, which finds no identity
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["data"]["message"], "Authentication required");
}

#[tokio::test]
async fn test_existing_identity_is_kept() {
    let (router, _) = build_router(false);
    let token = JwtHandler::new(JWT_SECRET, common::token_ttl())
        .issue("ghost@example.com")
        .unwrap();

    let mut request = Request::builder()
        .uri("/api/usuarios/findAll")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::new(),
        email: "upstream@example.com".to_string(),
        remote_addr: None,
    });

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let (router, _) = build_router(false);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/usuarios/nothing-here")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_rejected_before_service() {
    let (router, repository) = build_router(false);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/usuarios/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "nombre": "Ana" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(repository.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_swagger_ui_served_without_token() {
    let (router, _) = build_router(false);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/index.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_swagger_ui_ignores_bad_bearer() {
    let (router, _) = build_router(false);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/index.html")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

use utoipa::openapi::security::HttpAuthScheme;
use utoipa::openapi::security::HttpBuilder;
use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;

use super::handlers::create_user::CreateUserRequest;
use super::handlers::login::LoginRequest;
use super::handlers::patch_user::PatchUserRequest;
use super::handlers::update_user::UpdateUserRequest;
use super::handlers::ApiErrorData;
use super::handlers::PhoneRequest;
use super::handlers::UserResponseData;

/// Where the OpenAPI document is served; Swagger UI loads it from here.
pub const API_DOCS_PATH: &str = "/v3/api-docs";

pub const BEARER_SCHEME: &str = "bearerAuth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        version = "v1",
        description = "User registration, login and administration"
    ),
    paths(
        super::handlers::login::login,
        super::handlers::create_user::auth_create_user,
        super::handlers::create_user::create_user,
        super::handlers::list_users::list_users,
        super::handlers::update_user::update_user,
        super::handlers::patch_user::patch_user,
        super::handlers::delete_user::delete_user,
    ),
    components(schemas(
        ApiErrorData,
        CreateUserRequest,
        LoginRequest,
        PatchUserRequest,
        PhoneRequest,
        UpdateUserRequest,
        UserResponseData,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "Login and self registration"),
        (name = "users", description = "User administration"),
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BEARER_SCHEME,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

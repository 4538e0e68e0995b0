/// OpenAPI document and Swagger UI
///
/// Served at `/docs`, backed by `/api-docs/openapi.json`.

use crate::routes::users;
use axum::Router;
use tunestack_shared::{
    error::{ErrorResponse, ValidationErrorDetail},
    http::{health, MessageResponse},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "User Service", description = "User registration and authentication"),
    paths(
        health::root,
        health::health_check,
        users::register,
        users::login,
        users::list_users,
        users::get_user,
        users::delete_user,
    ),
    components(schemas(
        health::ServiceBanner,
        health::HealthResponse,
        users::RegisterRequest,
        users::LoginRequest,
        users::UserResponse,
        users::LoginUser,
        users::LoginResponse,
        MessageResponse,
        ErrorResponse,
        ValidationErrorDetail,
    )),
    tags((name = "health"), (name = "users"))
)]
pub struct ApiDoc;

/// Swagger UI routes
pub fn docs_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

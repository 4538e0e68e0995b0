/// User account endpoints
///
/// # Endpoints
///
/// - `POST /users/register` - Register a new user
/// - `POST /users/login` - Check credentials
/// - `GET /users` - List users
/// - `GET /users/{id}` - Fetch one user
/// - `DELETE /users/{id}` - Delete a user

use crate::{
    app::AppState,
    models::user::{CreateUser, User},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tunestack_shared::{
    auth::password,
    error::{ApiError, ApiResult, ErrorResponse},
    http::{
        extract::{AppJson, AppPath, AppQuery},
        MessageResponse,
    },
    pagination::ListParams,
};
use utoipa::ToSchema;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// User summary returned on login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Always "Login successful"
    pub message: String,

    /// The authenticated user
    pub user: LoginUser,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /users/register
/// Content-Type: application/json
///
/// {
///   "username": "rockstar",
///   "email": "rock@music.com",
///   "password": "secret123"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username or email already exists
/// - `422 Unprocessable Entity`: Validation failed
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    if User::username_or_email_taken(&state.db, &req.username, &req.email).await? {
        warn!(username = %req.username, "Registration rejected: duplicate username or email");
        return Err(duplicate_user());
    }

    let password_hash = password::hash_password_async(req.password).await?;

    // The UNIQUE constraints settle any race with a concurrent registration
    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await
    .map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => duplicate_user(),
        other => other,
    })?;

    info!(user_id = user.id, username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login a user
///
/// Confirms the credentials and stamps `last_login_at`. No token is issued.
/// Unknown usernames still pay for a password verification.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username or wrong password (same message for both)
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let Some(user) = User::find_by_username(&state.db, &req.username).await? else {
        // Same Argon2 cost as a wrong password
        password::verify_dummy_async(req.password).await?;
        warn!(username = %req.username, "Login failed: unknown username");
        return Err(invalid_credentials());
    };

    let valid = password::verify_password_async(req.password, user.password_hash.clone()).await?;
    if !valid {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    User::update_last_login(&state.db, user.id).await?;

    info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: LoginUser {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    }))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListParams),
    responses((status = 200, description = "All users", body = [UserResponse]))
)]
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list(&state.db, params.sql_limit(), params.sql_offset()).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(Json(user.into()))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    if !User::delete(&state.db, id).await? {
        return Err(user_not_found(id));
    }

    info!(user_id = id, "User deleted");

    Ok(Json(MessageResponse::new(format!(
        "User {} deleted successfully",
        id
    ))))
}

fn duplicate_user() -> ApiError {
    ApiError::Conflict("Username or email already exists".to_string())
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}

fn user_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("User {} not found", id))
}

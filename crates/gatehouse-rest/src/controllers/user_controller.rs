//! User management controller.

use crate::{
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use gatehouse_core::{GatehouseError, UserId, UserRole};
use gatehouse_service::dto::{
    CreateUserRequest, InvalidatedSessionsResponse, UpdateUserRequest, UserResponse,
    UserSessionsResponse,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route(
            "/:id/sessions",
            get(get_user_sessions).delete(clear_user_sessions),
        )
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Restrict the listing to a single role.
    pub role: Option<UserRole>,
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users listed", body = [UserResponse])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    let response = state.user_service.list_users(query.role).await?;
    ok(response)
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<crate::responses::ApiResponse<UserResponse>>), AppError> {
    debug!("Create user request: {}", request.email);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Update a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.user_service.update_user(user_id, request).await?;
    ok(response)
}

/// Delete a user.
///
/// Sessions owned by the user are left in the store; use the session
/// endpoints to remove them.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;

    Ok(no_content())
}

/// List the sessions owned by a user.
#[utoipa::path(
    get,
    path = "/users/{id}/sessions",
    tag = "sessions",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Sessions listed", body = UserSessionsResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_sessions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserSessionsResponse> {
    debug!("Get user sessions request: {}", id);

    let user_id = parse_user_id(&id)?;
    let response = state.session_service.sessions_for_user(user_id).await?;
    ok(response)
}

/// Remove every session owned by a user from the store.
#[utoipa::path(
    delete,
    path = "/users/{id}/sessions",
    tag = "sessions",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Sessions removed", body = InvalidatedSessionsResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn clear_user_sessions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<InvalidatedSessionsResponse> {
    debug!("Clear user sessions request: {}", id);

    let user_id = parse_user_id(&id)?;
    let removed = state.session_service.clear_user_sessions(user_id).await?;
    ok(InvalidatedSessionsResponse { removed })
}

/// Helper to parse user ID from path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(GatehouseError::Validation(format!("Invalid user ID: {}", id))))
}

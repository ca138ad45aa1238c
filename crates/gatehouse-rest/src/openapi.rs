//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use gatehouse_core::{ErrorResponse, FieldError, SessionId, UserId, UserRole};
use gatehouse_service::dto::{
    CreateUserRequest, InvalidateSessionsRequest, InvalidatedSessionsResponse, UpdateUserRequest,
    UserResponse, UserSessionsResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Gatehouse API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gatehouse API",
        version = "1.0.0",
        description = "User and session management API",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::user_controller::get_user_sessions,
        crate::controllers::user_controller::clear_user_sessions,
        // Session endpoints
        crate::controllers::session_controller::session_overview,
        crate::controllers::session_controller::invalidate_sessions,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            UserId,
            SessionId,
            UserRole,
            ErrorResponse,
            FieldError,
            // User DTOs
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            // Session DTOs
            UserSessionsResponse,
            InvalidateSessionsRequest,
            InvalidatedSessionsResponse,
            // Health
            HealthResponse,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "sessions", description = "Session reconciliation and invalidation endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

//! User service trait.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use gatehouse_core::{GatehouseResult, UserId, UserRole};

/// User management operations.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user; the initial role is derived from the email domain.
    async fn create_user(&self, request: CreateUserRequest) -> GatehouseResult<UserResponse>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> GatehouseResult<UserResponse>;

    /// Finds a user by email, creating it on first sight.
    ///
    /// This is the first-login upsert used when the external identity
    /// subsystem reports an authenticated principal. An existing user is
    /// returned unchanged; in particular its role is never recomputed.
    async fn get_or_create_user(&self, email: &str, name: &str) -> GatehouseResult<UserResponse>;

    /// Lists users, optionally filtered by role.
    async fn list_users(&self, role: Option<UserRole>) -> GatehouseResult<Vec<UserResponse>>;

    /// Updates a user's email, name and role.
    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> GatehouseResult<UserResponse>;

    /// Deletes a user by ID.
    ///
    /// Sessions are left untouched; a deleted user's sessions simply stop
    /// matching any user at reconciliation time and can be pruned later.
    async fn delete_user(&self, id: UserId) -> GatehouseResult<()>;

    /// Checks if an email is already registered.
    async fn email_exists(&self, email: &str) -> GatehouseResult<bool>;
}

//! Repository trait definitions.

use async_trait::async_trait;
use gatehouse_core::{GatehouseResult, SessionId, SessionRecord, User, UserId, UserRole};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> GatehouseResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> GatehouseResult<Option<User>>;

    /// Checks if an email exists.
    async fn exists_by_email(&self, email: &str) -> GatehouseResult<bool>;

    /// Finds all users, optionally filtered by role.
    async fn find_all(&self, role: Option<UserRole>) -> GatehouseResult<Vec<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> GatehouseResult<User>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> GatehouseResult<User>;

    /// Deletes a user by ID.
    async fn delete(&self, id: UserId) -> GatehouseResult<bool>;

    /// Counts all users.
    async fn count(&self) -> GatehouseResult<u64>;
}

/// Session store repository trait.
///
/// The session table is owned by the external authentication middleware;
/// this side only reads whole rows and deletes by id. Payloads are never
/// written or rewritten from here.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads every session record currently in the store.
    async fn find_all(&self) -> GatehouseResult<Vec<SessionRecord>>;

    /// Deletes the sessions with the given ids, returning how many rows
    /// were removed. Unknown ids are ignored; an empty slice is a no-op.
    async fn delete_by_ids(&self, ids: &[SessionId]) -> GatehouseResult<u64>;

    /// Counts all session records.
    async fn count(&self) -> GatehouseResult<u64>;
}

//! Session service trait.

use crate::dto::UserSessionsResponse;
use async_trait::async_trait;
use gatehouse_core::{GatehouseResult, SessionId, UserId};

/// Session reconciliation and invalidation operations.
///
/// All reads are recomputed from the store on every call; nothing is
/// cached. Invalidation removes rows from the store only, it does not
/// reach into live middleware state.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Returns every user paired with the ids of its live sessions.
    async fn user_sessions_overview(&self) -> GatehouseResult<Vec<UserSessionsResponse>>;

    /// Returns one user paired with the ids of its live sessions.
    async fn sessions_for_user(&self, id: UserId) -> GatehouseResult<UserSessionsResponse>;

    /// Removes the given sessions from the store, returning how many rows
    /// were deleted. An empty set is a no-op and never touches the store.
    async fn invalidate_sessions(&self, ids: &[SessionId]) -> GatehouseResult<u64>;

    /// Removes every session owned by the given user from the store.
    async fn clear_user_sessions(&self, id: UserId) -> GatehouseResult<u64>;

    /// Counts all session records in the store.
    async fn count_sessions(&self) -> GatehouseResult<u64>;
}

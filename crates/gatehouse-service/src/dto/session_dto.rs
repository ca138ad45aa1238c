//! Session-related DTOs.

use crate::dto::UserResponse;
use gatehouse_core::UserSessions;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A user together with the ids of its live sessions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSessionsResponse {
    pub user: UserResponse,
    /// Live session ids owned by the user; may be empty.
    pub sessions: Vec<String>,
}

impl From<UserSessions> for UserSessionsResponse {
    fn from(view: UserSessions) -> Self {
        Self {
            user: UserResponse::from(view.user),
            sessions: view.sessions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request to invalidate a set of sessions by id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InvalidateSessionsRequest {
    /// Session ids to remove from the store. May be empty.
    pub session_ids: Vec<String>,
}

/// Result of a session invalidation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvalidatedSessionsResponse {
    /// Number of sessions actually removed from the store.
    pub removed: u64,
}

//! Session service implementation.

use crate::dto::UserSessionsResponse;
use crate::reconcile::{attach_sessions, decode_sessions};
use crate::session_service::SessionService;
use async_trait::async_trait;
use gatehouse_core::{GatehouseError, GatehouseResult, SessionId, UserId};
use gatehouse_repository::{SessionRepository, UserRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Session service implementation.
pub struct SessionServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
}

impl SessionServiceImpl {
    /// Creates a new session service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
        }
    }

    /// Decodes the ids of every session owned by the given user.
    async fn owned_session_ids(&self, id: UserId) -> GatehouseResult<Vec<SessionId>> {
        let records = self.session_repository.find_all().await?;
        Ok(decode_sessions(&records)
            .into_iter()
            .filter(|s| s.owner == id)
            .map(|s| s.id)
            .collect())
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    async fn user_sessions_overview(&self) -> GatehouseResult<Vec<UserSessionsResponse>> {
        debug!("Building user sessions overview");

        let users = self.user_repository.find_all(None).await?;
        let records = self.session_repository.find_all().await?;
        let decoded = decode_sessions(&records);

        Ok(attach_sessions(users, decoded)
            .into_iter()
            .map(UserSessionsResponse::from)
            .collect())
    }

    async fn sessions_for_user(&self, id: UserId) -> GatehouseResult<UserSessionsResponse> {
        debug!("Listing sessions for user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| GatehouseError::not_found("User", id))?;

        let records = self.session_repository.find_all().await?;
        let decoded = decode_sessions(&records);

        let mut views = attach_sessions(vec![user], decoded);
        // attach_sessions yields exactly one entry per input user.
        views
            .pop()
            .map(UserSessionsResponse::from)
            .ok_or_else(|| GatehouseError::Internal("Empty reconciliation result".to_string()))
    }

    async fn invalidate_sessions(&self, ids: &[SessionId]) -> GatehouseResult<u64> {
        if ids.is_empty() {
            debug!("No sessions to invalidate");
            return Ok(0);
        }

        let removed = self.session_repository.delete_by_ids(ids).await?;

        info!("Invalidated {} of {} requested session(s)", removed, ids.len());
        Ok(removed)
    }

    async fn clear_user_sessions(&self, id: UserId) -> GatehouseResult<u64> {
        debug!("Clearing sessions for user: {}", id);

        if self.user_repository.find_by_id(id).await?.is_none() {
            return Err(GatehouseError::not_found("User", id));
        }

        let owned = self.owned_session_ids(id).await?;
        self.invalidate_sessions(&owned).await
    }

    async fn count_sessions(&self) -> GatehouseResult<u64> {
        self.session_repository.count().await
    }
}

impl std::fmt::Debug for SessionServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionServiceImpl").finish_non_exhaustive()
    }
}

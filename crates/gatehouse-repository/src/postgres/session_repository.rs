//! PostgreSQL session store repository implementation.
//!
//! Reads the table that the external authentication middleware writes.
//! Column names follow that store's layout: `id` is the opaque session
//! identifier and `json` is the serialized payload.

use crate::{traits::SessionRepository, DatabasePool};
use async_trait::async_trait;
use gatehouse_core::{GatehouseResult, SessionId, SessionRecord};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL session store repository implementation.
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: Arc<DatabasePool>,
}

impl PgSessionRepository {
    /// Creates a new PostgreSQL session repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a session.
#[derive(Debug, FromRow)]
struct SessionRow {
    id: String,
    json: String,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        SessionRecord::new(row.id, row.json)
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_all(&self) -> GatehouseResult<Vec<SessionRecord>> {
        debug!("Loading all session records");

        let rows = sqlx::query_as::<_, SessionRow>("SELECT id, json FROM sessions")
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(SessionRecord::from).collect())
    }

    async fn delete_by_ids(&self, ids: &[SessionId]) -> GatehouseResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        debug!("Deleting {} session(s)", ids.len());

        let id_strings: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();

        let result = sqlx::query("DELETE FROM sessions WHERE id = ANY($1)")
            .bind(&id_strings)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> GatehouseResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for PgSessionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgSessionRepository").finish_non_exhaustive()
    }
}

//! PostgreSQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatehouse_core::{Email, GatehouseError, GatehouseResult, User, UserId, UserRole};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<DatabasePool>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = GatehouseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role).ok_or_else(|| {
            GatehouseError::Internal(format!("Invalid role in database: {}", row.role))
        })?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email: Email::new_unchecked(row.email),
            name: row.name,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> GatehouseResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> GatehouseResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, role, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> GatehouseResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) LIMIT 1")
                .bind(email)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn find_all(&self, role: Option<UserRole>) -> GatehouseResult<Vec<User>> {
        debug!("Finding all users, role filter: {:?}", role);

        let rows = match role {
            Some(role) => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT id, email, name, role, created_at, updated_at
                    FROM users
                    WHERE role = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(role.to_string())
                .fetch_all(self.pool.inner())
                .await?
            }
            None => {
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT id, email, name, role, created_at, updated_at
                    FROM users
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(self.pool.inner())
                .await?
            }
        };

        rows.into_iter().map(User::try_from).collect()
    }

    async fn save(&self, user: &User) -> GatehouseResult<User> {
        debug!("Saving new user: {}", user.email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, name, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, name, role, created_at, updated_at
            "#,
        )
        .bind(user.id.into_inner())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(user.role.to_string())
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        User::try_from(row)
    }

    async fn update(&self, user: &User) -> GatehouseResult<User> {
        debug!("Updating user: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET email = $2, name = $3, role = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, email, name, role, created_at, updated_at
            "#,
        )
        .bind(user.id.into_inner())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(user.role.to_string())
        .bind(user.updated_at)
        .fetch_optional(self.pool.inner())
        .await?;

        match row {
            Some(row) => User::try_from(row),
            None => Err(GatehouseError::not_found("User", user.id)),
        }
    }

    async fn delete(&self, id: UserId) -> GatehouseResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> GatehouseResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for PgUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUserRepository").finish_non_exhaustive()
    }
}

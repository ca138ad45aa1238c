//! # Gatehouse Repository
//!
//! Data access layer for Gatehouse:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn SessionRepository>
//! PgUserRepository / PgSessionRepository   (PostgreSQL / SQLx)
//!   ↓
//! PostgreSQL
//! ```
//!
//! The `users` table is owned by this service; the `sessions` table is
//! written by the external authentication middleware and only read or
//! pruned here.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gatehouse_core::{
        Email, GatehouseResult, SessionId, SessionRecord, User, UserId, UserRole,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory mock user repository for testing.
    struct InMemoryUserRepository {
        users: Mutex<HashMap<UserId, User>>,
    }

    impl InMemoryUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }

        fn with_users(users: Vec<User>) -> Self {
            let repo = Self::new();
            for user in users {
                repo.users.lock().unwrap().insert(user.id, user);
            }
            repo
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_id(&self, id: UserId) -> GatehouseResult<Option<User>> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> GatehouseResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email.as_str().eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn exists_by_email(&self, email: &str) -> GatehouseResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .any(|u| u.email.as_str().eq_ignore_ascii_case(email)))
        }

        async fn find_all(&self, role: Option<UserRole>) -> GatehouseResult<Vec<User>> {
            let mut users: Vec<User> = self
                .users
                .lock()
                .unwrap()
                .values()
                .filter(|u| role.map_or(true, |r| u.role == r))
                .cloned()
                .collect();
            users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(users)
        }

        async fn save(&self, user: &User) -> GatehouseResult<User> {
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn update(&self, user: &User) -> GatehouseResult<User> {
            self.users.lock().unwrap().insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: UserId) -> GatehouseResult<bool> {
            Ok(self.users.lock().unwrap().remove(&id).is_some())
        }

        async fn count(&self) -> GatehouseResult<u64> {
            Ok(self.users.lock().unwrap().len() as u64)
        }
    }

    /// In-memory mock session repository for testing.
    struct InMemorySessionRepository {
        sessions: Mutex<Vec<SessionRecord>>,
    }

    impl InMemorySessionRepository {
        fn with_sessions(sessions: Vec<SessionRecord>) -> Self {
            Self {
                sessions: Mutex::new(sessions),
            }
        }
    }

    #[async_trait]
    impl SessionRepository for InMemorySessionRepository {
        async fn find_all(&self) -> GatehouseResult<Vec<SessionRecord>> {
            Ok(self.sessions.lock().unwrap().clone())
        }

        async fn delete_by_ids(&self, ids: &[SessionId]) -> GatehouseResult<u64> {
            let mut sessions = self.sessions.lock().unwrap();
            let before = sessions.len();
            sessions.retain(|s| !ids.contains(&s.id));
            Ok((before - sessions.len()) as u64)
        }

        async fn count(&self) -> GatehouseResult<u64> {
            Ok(self.sessions.lock().unwrap().len() as u64)
        }
    }

    fn create_test_user(email: &str) -> User {
        User::register(
            Email::new(email).unwrap(),
            "Test User".to_string(),
            "innogiant.com",
        )
    }

    fn session(id: &str, owner: UserId) -> SessionRecord {
        SessionRecord::new(id, format!(r#"{{"passport":{{"user":"{}"}}}}"#, owner))
    }

    // =========================================================================
    // UserRepository Tests
    // =========================================================================

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("jane@innogiant.com");
        let user_id = user.id;

        repo.save(&user).await.unwrap();

        let found = repo.find_by_id(user_id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().email.as_str(), "jane@innogiant.com");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryUserRepository::new();
        let result = repo.find_by_id(UserId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_email_case_insensitive() {
        let user = create_test_user("jane@innogiant.com");
        let repo = InMemoryUserRepository::with_users(vec![user]);

        let found = repo.find_by_email("JANE@INNOGIANT.COM").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_exists_by_email() {
        let user = create_test_user("jane@innogiant.com");
        let repo = InMemoryUserRepository::with_users(vec![user]);

        assert!(repo.exists_by_email("jane@innogiant.com").await.unwrap());
        assert!(!repo.exists_by_email("nobody@innogiant.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_with_role_filter() {
        let verified = create_test_user("jane@innogiant.com");
        let unverified = create_test_user("someone@gmail.com");
        let repo = InMemoryUserRepository::with_users(vec![verified, unverified]);

        let all = repo.find_all(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let verified_only = repo.find_all(Some(UserRole::Verified)).await.unwrap();
        assert_eq!(verified_only.len(), 1);
        assert_eq!(verified_only[0].email.as_str(), "jane@innogiant.com");

        let admins = repo.find_all(Some(UserRole::Admin)).await.unwrap();
        assert!(admins.is_empty());
    }

    #[tokio::test]
    async fn test_update_user() {
        let mut user = create_test_user("jane@innogiant.com");
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_users(vec![user.clone()]);

        user.apply_update(
            Email::new("jane.doe@innogiant.com").unwrap(),
            "Jane Doe".to_string(),
            UserRole::Admin,
        );
        repo.update(&user).await.unwrap();

        let found = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(found.name, "Jane Doe");
        assert!(found.is_admin());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let user = create_test_user("jane@innogiant.com");
        let user_id = user.id;
        let repo = InMemoryUserRepository::with_users(vec![user]);

        assert!(repo.delete(user_id).await.unwrap());
        assert!(repo.find_by_id(user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_user() {
        let repo = InMemoryUserRepository::new();
        assert!(!repo.delete(UserId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_users() {
        let users = vec![
            create_test_user("a@innogiant.com"),
            create_test_user("b@innogiant.com"),
        ];
        let repo = InMemoryUserRepository::with_users(users);

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    // =========================================================================
    // SessionRepository Tests
    // =========================================================================

    #[tokio::test]
    async fn test_session_find_all() {
        let owner = UserId::new();
        let repo = InMemorySessionRepository::with_sessions(vec![
            session("sess-a", owner),
            session("sess-b", owner),
        ]);

        let records = repo.find_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "sess-a");
    }

    #[tokio::test]
    async fn test_session_delete_by_ids() {
        let owner = UserId::new();
        let repo = InMemorySessionRepository::with_sessions(vec![
            session("sess-a", owner),
            session("sess-b", owner),
            session("sess-c", owner),
        ]);

        let removed = repo
            .delete_by_ids(&[SessionId::from("sess-a"), SessionId::from("sess-c")])
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_session_delete_unknown_ids_ignored() {
        let owner = UserId::new();
        let repo = InMemorySessionRepository::with_sessions(vec![session("sess-a", owner)]);

        let removed = repo
            .delete_by_ids(&[SessionId::from("sess-a"), SessionId::from("no-such")])
            .await
            .unwrap();
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn test_session_delete_empty_is_noop() {
        let owner = UserId::new();
        let repo = InMemorySessionRepository::with_sessions(vec![session("sess-a", owner)]);

        let removed = repo.delete_by_ids(&[]).await.unwrap();
        assert_eq!(removed, 0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}

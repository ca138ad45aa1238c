//! User service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use gatehouse_core::{Email, GatehouseError, GatehouseResult, User, UserId, UserRole, ValidateExt};
use gatehouse_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// User service implementation.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    verified_domain: String,
}

impl UserServiceImpl {
    /// Creates a new user service.
    ///
    /// `verified_domain` is the company email domain used to derive the
    /// initial role of new accounts.
    pub fn new(user_repository: Arc<dyn UserRepository>, verified_domain: String) -> Self {
        Self {
            user_repository,
            verified_domain,
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: CreateUserRequest) -> GatehouseResult<UserResponse> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        if self.user_repository.exists_by_email(&request.email).await? {
            return Err(GatehouseError::Conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let email =
            Email::new(&request.email).map_err(|e| GatehouseError::Validation(e.to_string()))?;

        let user = User::register(email, request.name, &self.verified_domain);

        let saved_user = self.user_repository.save(&user).await?;

        info!("User created: {} ({})", saved_user.id, saved_user.role);
        Ok(UserResponse::from(saved_user))
    }

    async fn get_or_create_user(&self, email: &str, name: &str) -> GatehouseResult<UserResponse> {
        debug!("Get or create user: {}", email);

        let email = Email::new(email).map_err(|e| GatehouseError::Validation(e.to_string()))?;

        if let Some(existing) = self.user_repository.find_by_email(email.as_str()).await? {
            return Ok(UserResponse::from(existing));
        }

        let user = User::register(email, name.to_string(), &self.verified_domain);
        let saved_user = self.user_repository.save(&user).await?;

        info!("User created on first login: {} ({})", saved_user.id, saved_user.role);
        Ok(UserResponse::from(saved_user))
    }

    async fn get_user(&self, id: UserId) -> GatehouseResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| GatehouseError::not_found("User", id))?;

        Ok(UserResponse::from(user))
    }

    async fn list_users(&self, role: Option<UserRole>) -> GatehouseResult<Vec<UserResponse>> {
        debug!("Listing users, role filter: {:?}", role);

        let users = self.user_repository.find_all(role).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> GatehouseResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| GatehouseError::not_found("User", id))?;

        if !user.email.as_str().eq_ignore_ascii_case(&request.email)
            && self.user_repository.exists_by_email(&request.email).await?
        {
            return Err(GatehouseError::Conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let email =
            Email::new(&request.email).map_err(|e| GatehouseError::Validation(e.to_string()))?;

        user.apply_update(email, request.name, request.role);

        let updated_user = self.user_repository.update(&user).await?;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated_user))
    }

    async fn delete_user(&self, id: UserId) -> GatehouseResult<()> {
        debug!("Deleting user: {}", id);

        let deleted = self.user_repository.delete(id).await?;

        if !deleted {
            return Err(GatehouseError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> GatehouseResult<bool> {
        self.user_repository.exists_by_email(email).await
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

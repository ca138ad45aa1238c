//! User entity.

use super::super::value_objects::{Email, UserRole};
use crate::{Entity, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User account entity.
///
/// Accounts are created on the first successful external authentication of
/// an unseen email address; the identity provider supplies the email and
/// display name, and the initial role comes from the company-domain rule.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Email address; unique, used as the natural key for lookup.
    pub email: Email,

    /// Display name.
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Account role.
    pub role: UserRole,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with the given details.
    #[must_use]
    pub fn new(email: Email, name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            name,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new user, deriving the initial role from the email domain.
    #[must_use]
    pub fn register(email: Email, name: String, verified_domain: &str) -> Self {
        let role = UserRole::for_email(&email, verified_domain);
        Self::new(email, name, role)
    }

    /// Applies an explicit profile update.
    pub fn apply_update(&mut self, email: Email, name: String, role: UserRole) {
        self.email = email;
        self.name = name;
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl Entity<UserId> for User {
    fn id(&self) -> &UserId {
        &self.id
    }
}

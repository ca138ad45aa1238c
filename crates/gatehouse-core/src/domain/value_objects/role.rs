//! User role value object.

use crate::Email;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account roles.
///
/// A role is assigned at creation time by [`UserRole::for_email`] and only
/// changes through an explicit profile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Account created from an email outside the company domain.
    #[default]
    Unverified,
    /// Account created from an email under the company domain.
    Verified,
    /// Administrator with full access.
    Admin,
}

impl UserRole {
    /// Returns the initial role for a freshly created account.
    ///
    /// Emails under the configured company domain start out `Verified`;
    /// everything else starts `Unverified`. Admin is never assigned here.
    #[must_use]
    pub fn for_email(email: &Email, verified_domain: &str) -> Self {
        if email.domain() == verified_domain.trim().to_lowercase() {
            Self::Verified
        } else {
            Self::Unverified
        }
    }

    /// Checks if this role grants administrative access.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns all available roles.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Unverified, Self::Verified, Self::Admin]
    }

    /// Parses a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unverified" => Some(Self::Unverified),
            "verified" => Some(Self::Verified),
            "admin" | "administrator" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unverified => write!(f, "unverified"),
            Self::Verified => write!(f, "verified"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_for_company_email() {
        let email = Email::new("dev@innogiant.com").unwrap();
        assert_eq!(UserRole::for_email(&email, "innogiant.com"), UserRole::Verified);
    }

    #[test]
    fn test_role_for_external_email() {
        let email = Email::new("someone@gmail.com").unwrap();
        assert_eq!(UserRole::for_email(&email, "innogiant.com"), UserRole::Unverified);
    }

    #[test]
    fn test_role_for_email_domain_case_insensitive() {
        let email = Email::new("dev@innogiant.com").unwrap();
        assert_eq!(
            UserRole::for_email(&email, "INNOGIANT.COM"),
            UserRole::Verified
        );
    }

    #[test]
    fn test_role_for_email_never_assigns_admin() {
        for addr in ["admin@innogiant.com", "root@elsewhere.org"] {
            let email = Email::new(addr).unwrap();
            assert!(!UserRole::for_email(&email, "innogiant.com").is_admin());
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("verified"), Some(UserRole::Verified));
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("unverified"), Some(UserRole::Unverified));
        assert_eq!(UserRole::parse("nonsense"), None);
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in UserRole::all() {
            assert_eq!(UserRole::parse(&role.to_string()), Some(role));
        }
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&UserRole::Verified).unwrap();
        assert_eq!(json, "\"verified\"");
    }
}

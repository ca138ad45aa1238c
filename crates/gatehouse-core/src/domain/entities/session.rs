//! Persisted session records and the derived per-user session view.

use super::user::User;
use crate::{SessionId, UserId};
use serde::{Deserialize, Serialize};

/// A raw session row as read from the session store.
///
/// The payload is the opaque serialized blob written by the external
/// authentication middleware; it embeds the owning user's id. Store-level
/// metadata (expiry, last-touched time) belongs to the store and is never
/// read or changed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Opaque session identifier.
    pub id: SessionId,
    /// Serialized session payload.
    pub payload: String,
}

impl SessionRecord {
    /// Creates a new session record.
    #[must_use]
    pub fn new(id: impl Into<SessionId>, payload: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }
}

/// The result of decoding a session payload: the session id paired with the
/// embedded owner reference.
///
/// This is an immutable value produced by the decode step; the store-returned
/// [`SessionRecord`] is never mutated to carry the derived owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSession {
    /// Opaque session identifier.
    pub id: SessionId,
    /// The user this session belongs to.
    pub owner: UserId,
}

impl DecodedSession {
    /// Creates a new decoded session.
    #[must_use]
    pub fn new(id: impl Into<SessionId>, owner: UserId) -> Self {
        Self {
            id: id.into(),
            owner,
        }
    }
}

/// A user together with the ids of the sessions that currently belong to it.
///
/// This is a derived, read-time join; it is recomputed on every query and
/// never persisted or cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSessions {
    /// The user record.
    pub user: User,
    /// Ids of live sessions owned by the user; may be empty.
    pub sessions: Vec<SessionId>,
}

impl UserSessions {
    /// Creates a view with no attached sessions.
    #[must_use]
    pub fn without_sessions(user: User) -> Self {
        Self {
            user,
            sessions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Email, UserRole};

    #[test]
    fn test_session_record() {
        let record = SessionRecord::new("sess-1", r#"{"passport":{"user":"x"}}"#);
        assert_eq!(record.id.as_str(), "sess-1");
        assert!(record.payload.contains("passport"));
    }

    #[test]
    fn test_decoded_session() {
        let owner = UserId::new();
        let decoded = DecodedSession::new("sess-1", owner);
        assert_eq!(decoded.owner, owner);
        assert_eq!(decoded.id.as_str(), "sess-1");
    }

    #[test]
    fn test_user_sessions_without_sessions() {
        let user = User::new(
            Email::new("a@example.com").unwrap(),
            "A".to_string(),
            UserRole::Unverified,
        );
        let view = UserSessions::without_sessions(user.clone());
        assert_eq!(view.user.id, user.id);
        assert!(view.sessions.is_empty());
    }
}

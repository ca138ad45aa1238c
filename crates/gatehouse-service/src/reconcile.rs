//! Session-to-user reconciliation.
//!
//! The session store is written by the external authentication middleware;
//! nothing in it references the `users` table directly. Ownership is
//! recovered at read time by decoding each payload and joining the result
//! against the user list. The join is a sort-merge: both sides are ordered
//! by the same [`UserId`] comparison, then walked with two cursors.

use gatehouse_core::{DecodedSession, SessionRecord, User, UserId, UserSessions};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

/// Shape of the slice of the session payload this service cares about.
///
/// Payloads carry plenty of other middleware state; everything except the
/// authenticated user reference is ignored.
#[derive(Debug, Deserialize)]
struct SessionPayload {
    passport: Option<PassportState>,
}

#[derive(Debug, Deserialize)]
struct PassportState {
    user: Option<Uuid>,
}

/// Decodes the owning user id out of a raw session record.
///
/// Returns `None` when the payload is not valid JSON, the passport block
/// is absent (an anonymous session), or the user reference is not a well
/// formed id. Callers treat `None` as "skip this record".
#[must_use]
pub fn decode_owner(record: &SessionRecord) -> Option<UserId> {
    let payload: SessionPayload = serde_json::from_str(&record.payload).ok()?;
    let user = payload.passport?.user?;
    Some(UserId::from_uuid(user))
}

/// Decodes a batch of session records, silently dropping every record
/// whose owner cannot be recovered.
///
/// One corrupt payload must never poison the rest of the batch.
#[must_use]
pub fn decode_sessions(records: &[SessionRecord]) -> Vec<DecodedSession> {
    records
        .iter()
        .filter_map(|record| match decode_owner(record) {
            Some(owner) => Some(DecodedSession::new(record.id.clone(), owner)),
            None => {
                debug!("Skipping undecodable session payload: {}", record.id);
                None
            }
        })
        .collect()
}

/// Joins decoded sessions onto their owning users.
///
/// Both inputs may arrive in any order. The output contains exactly one
/// entry per input user, in ascending id order; users with no sessions get
/// an empty list. Sessions whose owner is not in `users` are dropped.
#[must_use]
pub fn attach_sessions(
    mut users: Vec<User>,
    mut sessions: Vec<DecodedSession>,
) -> Vec<UserSessions> {
    users.sort_by(|a, b| a.id.cmp(&b.id));
    sessions.sort_by(|a, b| a.owner.cmp(&b.owner));

    let mut result = Vec::with_capacity(users.len());
    let mut cursor = 0;

    for user in users {
        // Owners below the current user cannot match any remaining user.
        while cursor < sessions.len() && sessions[cursor].owner < user.id {
            cursor += 1;
        }

        let mut owned = Vec::new();
        while cursor < sessions.len() && sessions[cursor].owner == user.id {
            owned.push(sessions[cursor].id.clone());
            cursor += 1;
        }

        result.push(UserSessions {
            user,
            sessions: owned,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::{Email, SessionId, UserRole};

    fn user(email: &str) -> User {
        User::new(
            Email::new(email).unwrap(),
            "Test User".to_string(),
            UserRole::Verified,
        )
    }

    fn record(id: &str, owner: UserId) -> SessionRecord {
        SessionRecord::new(id, format!(r#"{{"passport":{{"user":"{}"}}}}"#, owner))
    }

    fn session_ids(view: &UserSessions) -> Vec<&str> {
        view.sessions.iter().map(SessionId::as_str).collect()
    }

    #[test]
    fn test_decode_owner() {
        let owner = UserId::new();
        let decoded = decode_owner(&record("sess-a", owner));
        assert_eq!(decoded, Some(owner));
    }

    #[test]
    fn test_decode_owner_not_json() {
        let record = SessionRecord::new("sess-a", "not json at all");
        assert_eq!(decode_owner(&record), None);
    }

    #[test]
    fn test_decode_owner_missing_passport() {
        let record = SessionRecord::new("sess-a", r#"{"cookie":{"path":"/"}}"#);
        assert_eq!(decode_owner(&record), None);
    }

    #[test]
    fn test_decode_owner_anonymous_passport() {
        let record = SessionRecord::new("sess-a", r#"{"passport":{}}"#);
        assert_eq!(decode_owner(&record), None);
    }

    #[test]
    fn test_decode_owner_malformed_user_id() {
        let record = SessionRecord::new("sess-a", r#"{"passport":{"user":"not-a-uuid"}}"#);
        assert_eq!(decode_owner(&record), None);
    }

    #[test]
    fn test_decode_sessions_skips_bad_records() {
        let owner = UserId::new();
        let records = vec![
            record("sess-a", owner),
            SessionRecord::new("sess-b", "garbage"),
            record("sess-c", owner),
        ];

        let decoded = decode_sessions(&records);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].id.as_str(), "sess-a");
        assert_eq!(decoded[1].id.as_str(), "sess-c");
    }

    #[test]
    fn test_attach_sessions_groups_by_owner() {
        let user1 = user("one@innogiant.com");
        let user2 = user("two@innogiant.com");
        let user3 = user("three@innogiant.com");
        let stranger = UserId::new();

        let sessions = decode_sessions(&[
            record("sess-a", user2.id),
            record("sess-b", user1.id),
            record("sess-c", user2.id),
            record("sess-d", stranger),
        ]);

        let result = attach_sessions(vec![user1.clone(), user2.clone(), user3.clone()], sessions);

        assert_eq!(result.len(), 3);
        for view in &result {
            if view.user.id == user1.id {
                assert_eq!(session_ids(view), vec!["sess-b"]);
            } else if view.user.id == user2.id {
                let mut ids = session_ids(view);
                ids.sort_unstable();
                assert_eq!(ids, vec!["sess-a", "sess-c"]);
            } else {
                assert_eq!(view.user.id, user3.id);
                assert!(view.sessions.is_empty());
            }
        }
    }

    #[test]
    fn test_attach_sessions_one_entry_per_user() {
        let users: Vec<User> = (0..5).map(|i| user(&format!("u{}@innogiant.com", i))).collect();
        let sessions = decode_sessions(&[record("sess-a", users[2].id)]);

        let result = attach_sessions(users.clone(), sessions);
        assert_eq!(result.len(), users.len());
    }

    #[test]
    fn test_attach_sessions_output_sorted_by_user_id() {
        let users: Vec<User> = (0..8).map(|i| user(&format!("u{}@innogiant.com", i))).collect();
        let result = attach_sessions(users, Vec::new());

        for pair in result.windows(2) {
            assert!(pair[0].user.id < pair[1].user.id);
        }
    }

    #[test]
    fn test_attach_sessions_unsorted_inputs() {
        let mut users: Vec<User> = (0..6).map(|i| user(&format!("u{}@innogiant.com", i))).collect();
        let target = users[4].clone();
        users.reverse();

        let mut sessions = decode_sessions(&[
            record("sess-a", target.id),
            record("sess-b", users[0].id),
        ]);
        sessions.reverse();

        let result = attach_sessions(users, sessions);
        let view = result.iter().find(|v| v.user.id == target.id).unwrap();
        assert_eq!(session_ids(view), vec!["sess-a"]);
    }

    #[test]
    fn test_attach_sessions_no_users() {
        let sessions = decode_sessions(&[record("sess-a", UserId::new())]);
        let result = attach_sessions(Vec::new(), sessions);
        assert!(result.is_empty());
    }

    #[test]
    fn test_attach_sessions_no_sessions() {
        let users = vec![user("a@innogiant.com"), user("b@innogiant.com")];
        let result = attach_sessions(users, Vec::new());
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.sessions.is_empty()));
    }

    #[test]
    fn test_single_user_matches_batch_extraction() {
        let users: Vec<User> = (0..4).map(|i| user(&format!("u{}@innogiant.com", i))).collect();
        let target = users[1].clone();
        let records = [
            record("sess-a", target.id),
            record("sess-b", users[3].id),
            record("sess-c", target.id),
        ];

        let batch = attach_sessions(users.clone(), decode_sessions(&records));
        let from_batch = batch.iter().find(|v| v.user.id == target.id).unwrap();

        let single = attach_sessions(vec![target.clone()], decode_sessions(&records));
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].sessions, from_batch.sessions);
    }
}

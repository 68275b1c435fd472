/// In-process session store
///
/// Associates an opaque token with an authenticated identity for the
/// lifetime of the process. Sessions are created on login, resolved on each
/// authenticated request, and revoked on logout. The identity is handed to
/// request handlers as an explicit value rather than ambient state, which
/// keeps the handlers testable in isolation.
///
/// Tokens are random UUIDs; nothing about the user is derivable from them.
///
/// # Example
///
/// ```
/// use lmsvision_shared::auth::session::{SessionIdentity, SessionStore};
///
/// let sessions = SessionStore::new();
/// let token = sessions.create(SessionIdentity::User(42));
///
/// assert_eq!(sessions.resolve(&token), Some(SessionIdentity::User(42)));
///
/// sessions.revoke(&token);
/// assert_eq!(sessions.resolve(&token), None);
/// ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// The identity bound to a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIdentity {
    /// A logged-in user, by user id
    User(i64),

    /// A logged-in admin, by admin id
    Admin(i64),
}

impl SessionIdentity {
    /// Returns the user id if this session belongs to a user
    pub fn user_id(&self) -> Option<i64> {
        match self {
            SessionIdentity::User(id) => Some(*id),
            SessionIdentity::Admin(_) => None,
        }
    }

    /// Returns the admin id if this session belongs to an admin
    pub fn admin_id(&self) -> Option<i64> {
        match self {
            SessionIdentity::Admin(id) => Some(*id),
            SessionIdentity::User(_) => None,
        }
    }
}

/// Thread-safe map from session token to identity
///
/// Cheap to clone; all clones share the same underlying map. State does not
/// survive a restart, which matches the login/logout lifecycle: a restarted
/// server simply requires clients to log in again.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionIdentity>>>,
}

impl SessionStore {
    /// Creates an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session for the given identity and returns its token
    pub fn create(&self, identity: SessionIdentity) -> String {
        let token = Uuid::new_v4().simple().to_string();

        // Lock poisoning only happens if a holder panicked; propagating the
        // panic is the right response.
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), identity);

        token
    }

    /// Resolves a token to its identity, if the session exists
    pub fn resolve(&self, token: &str) -> Option<SessionIdentity> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .copied()
    }

    /// Revokes a session
    ///
    /// Returns true if a session was actually removed.
    pub fn revoke(&self, token: &str) -> bool {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token)
            .is_some()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .len()
    }

    /// True if no sessions are live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve() {
        let store = SessionStore::new();
        let token = store.create(SessionIdentity::User(7));

        assert_eq!(store.resolve(&token), Some(SessionIdentity::User(7)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new();
        let t1 = store.create(SessionIdentity::User(1));
        let t2 = store.create(SessionIdentity::User(1));

        assert_ne!(t1, t2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::new();
        let token = store.create(SessionIdentity::Admin(3));

        assert!(store.revoke(&token));
        assert_eq!(store.resolve(&token), None);
        assert!(store.is_empty());

        // Second revoke is a no-op
        assert!(!store.revoke(&token));
    }

    #[test]
    fn test_unknown_token() {
        let store = SessionStore::new();
        assert_eq!(store.resolve("no-such-token"), None);
    }

    #[test]
    fn test_identity_accessors() {
        let user = SessionIdentity::User(5);
        let admin = SessionIdentity::Admin(9);

        assert_eq!(user.user_id(), Some(5));
        assert_eq!(user.admin_id(), None);
        assert_eq!(admin.admin_id(), Some(9));
        assert_eq!(admin.user_id(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let clone = store.clone();

        let token = store.create(SessionIdentity::User(11));
        assert_eq!(clone.resolve(&token), Some(SessionIdentity::User(11)));

        clone.revoke(&token);
        assert_eq!(store.resolve(&token), None);
    }
}

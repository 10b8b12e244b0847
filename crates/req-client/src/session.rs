//! Session continuity state.

use tracing::debug;

/// Session key and cookie carried from one response to the next request.
///
/// Both values are opaque tokens handed out by the service. Once set they are
/// only ever overwritten by a newer value, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    session_key: Option<String>,
    cookie: Option<String>,
}

impl SessionState {
    /// Create an empty session
    #[must_use]
    pub const fn new() -> Self {
        Self {
            session_key: None,
            cookie: None,
        }
    }

    /// Current `(session key, cookie)` pair
    #[must_use]
    pub fn get(&self) -> (Option<&str>, Option<&str>) {
        (self.session_key(), self.cookie())
    }

    /// Current session key (`CleSession`)
    #[must_use]
    pub fn session_key(&self) -> Option<&str> {
        self.session_key.as_deref()
    }

    /// Current cookie value
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Store whichever values are supplied; `None` leaves a field untouched.
    pub fn update(&mut self, session_key: Option<String>, cookie: Option<String>) {
        if let Some(key) = session_key {
            debug!(session_key = %key, "session key updated");
            self.session_key = Some(key);
        }
        if let Some(cookie) = cookie {
            debug!(cookie = %cookie, "cookie updated");
            self.cookie = Some(cookie);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::new();
        assert_eq!(session.get(), (None, None));
        assert_eq!(session, SessionState::default());
    }

    #[test]
    fn test_update_sets_supplied_values() {
        let mut session = SessionState::new();
        session.update(Some("key-1".into()), None);
        assert_eq!(session.get(), (Some("key-1"), None));

        session.update(None, Some("ASP.NET_SessionId=xyz;".into()));
        assert_eq!(session.get(), (Some("key-1"), Some("ASP.NET_SessionId=xyz;")));
    }

    #[test]
    fn test_update_last_write_wins() {
        let mut session = SessionState::new();
        session.update(Some("key-1".into()), Some("a=1;".into()));
        session.update(Some("key-2".into()), Some("b=2;".into()));
        assert_eq!(session.session_key(), Some("key-2"));
        assert_eq!(session.cookie(), Some("b=2;"));
    }

    #[test]
    fn test_absent_values_never_reset() {
        let mut session = SessionState::new();
        session.update(Some("key-1".into()), Some("a=1;".into()));
        session.update(None, None);
        assert_eq!(session.get(), (Some("key-1"), Some("a=1;")));
    }
}

//! Session manager for lifecycle management

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::error::{SessionError, SessionResult};
use crate::session::Session;

/// Owns every live session, indexed by id
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
    lifetime: Duration,
}

impl SessionManager {
    /// Create a manager whose sessions expire after `lifetime` of inactivity
    pub fn new(lifetime: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            lifetime,
        }
    }

    /// Idle lifetime of a session
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Start a brand new session
    pub fn start(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id().to_string(), session.clone());
        debug!("Session started: {}", session.id());
        session
    }

    /// Look up a live session and record activity on it
    pub fn get(&self, session_id: &str) -> SessionResult<Session> {
        self.get_at(session_id, Utc::now())
    }

    fn get_at(&self, session_id: &str, now: DateTime<Utc>) -> SessionResult<Session> {
        if session_id.is_empty() || !session_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SessionError::InvalidId(session_id.to_string()));
        }

        let session = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        if session.is_expired_at(self.lifetime, now) {
            self.destroy(session_id);
            return Err(SessionError::Expired(session_id.to_string()));
        }

        session.touch_at(now);
        Ok(session)
    }

    /// Resume the session named by the cookie, or start a new one.
    ///
    /// The flag is `true` when a new session was started and the caller needs
    /// to send a fresh cookie.
    pub fn resume_or_start(&self, session_id: Option<&str>) -> (Session, bool) {
        match session_id.map(|id| self.get(id)) {
            Some(Ok(session)) => (session, false),
            Some(Err(e)) => {
                debug!("Cannot resume session: {}", e);
                (self.start(), true)
            }
            None => (self.start(), true),
        }
    }

    /// Forget a session
    pub fn destroy(&self, session_id: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
            .is_some()
    }

    /// Discard every session idle past its lifetime, returning how many went
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(self.lifetime, now));
        let purged = before - sessions.len();
        if purged > 0 {
            info!("Purged {} expired sessions", purged);
        }
        purged
    }

    /// Number of live sessions
    pub fn count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Duration::hours(2))
    }
}

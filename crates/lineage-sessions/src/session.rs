//! A single visitor session

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

/// Key/value access to session state.
///
/// Consumers such as the theme resolver take `&dyn SessionStore` (or a generic
/// `S: SessionStore`) so they can be exercised without an HTTP stack.
pub trait SessionStore {
    /// Value stored under `key`, or `default` when absent
    fn get(&self, key: &str, default: &str) -> String;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str);

    /// Remove `key`
    fn forget(&self, key: &str);

    /// Whether `key` holds a value
    fn has(&self, key: &str) -> bool;
}

#[derive(Debug)]
struct SessionData {
    values: HashMap<String, String>,
    last_activity: DateTime<Utc>,
}

/// A visitor session.
///
/// Cloning yields another handle to the same state, so the copy placed in
/// request extensions and the one held by the [`crate::SessionManager`] see
/// the same writes.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
    data: Arc<RwLock<SessionData>>,
}

impl Session {
    /// Start a new, empty session with a random id
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Start a new, empty session with a known id
    pub fn with_id(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            data: Arc::new(RwLock::new(SessionData {
                values: HashMap::new(),
                last_activity: now,
            })),
        }
    }

    /// Session id, as sent in the cookie
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the session was started
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last time the session was touched
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last_activity
    }

    /// Record activity now
    pub fn touch(&self) {
        self.touch_at(Utc::now());
    }

    pub(crate) fn touch_at(&self, at: DateTime<Utc>) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .last_activity = at;
    }

    /// Whether the session has been idle for longer than `lifetime` at `now`
    pub fn is_expired_at(&self, lifetime: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_activity() > lifetime
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for Session {
    fn get(&self, key: &str, default: &str) -> String {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn put(&self, key: &str, value: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .insert(key.to_string(), value.to_string());
    }

    fn forget(&self, key: &str) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .remove(key);
    }

    fn has(&self, key: &str) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values
            .contains_key(key)
    }
}

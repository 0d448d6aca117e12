//! Server-side admin sessions keyed by a random id carried in a signed cookie.

use crate::error::AppError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "catalog.sid";

/// Default lifetime of an admin session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, Debug)]
pub struct SessionRecord {
    pub admin_id: i32,
    pub username: String,
    pub expires_at: Instant,
}

impl SessionRecord {
    /// A record is usable only when it names an admin by both id and username.
    pub fn is_well_formed(&self) -> bool {
        self.admin_id > 0 && !self.username.trim().is_empty()
    }
}

/// In-memory session store shared by all requests. Cloning shares the map.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionRecord>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for an admin. Expired sessions are pruned on the way.
    pub fn create(&self, admin_id: i32, username: &str) -> Result<Uuid, AppError> {
        let now = Instant::now();
        let id = Uuid::new_v4();
        let mut guard = self
            .sessions
            .write()
            .map_err(|_| AppError::Internal("session store lock poisoned".into()))?;
        guard.retain(|_, s| s.expires_at > now);
        guard.insert(
            id,
            SessionRecord {
                admin_id,
                username: username.to_string(),
                expires_at: now + self.ttl,
            },
        );
        Ok(id)
    }

    /// Live session for `id`. An expired record is removed and reported as absent.
    pub fn get(&self, id: &Uuid) -> Result<Option<SessionRecord>, AppError> {
        let now = Instant::now();
        {
            let guard = self
                .sessions
                .read()
                .map_err(|_| AppError::Internal("session store lock poisoned".into()))?;
            match guard.get(id) {
                None => return Ok(None),
                Some(s) if s.expires_at > now => return Ok(Some(s.clone())),
                Some(_) => {}
            }
        }
        self.destroy(id)?;
        Ok(None)
    }

    /// Remove a session. Returns whether one existed.
    pub fn destroy(&self, id: &Uuid) -> Result<bool, AppError> {
        let mut guard = self
            .sessions
            .write()
            .map_err(|_| AppError::Internal("session store lock poisoned".into()))?;
        Ok(guard.remove(id).is_some())
    }

    #[cfg(test)]
    pub(crate) fn insert(&self, id: Uuid, record: SessionRecord) -> Result<(), AppError> {
        let mut guard = self
            .sessions
            .write()
            .map_err(|_| AppError::Internal("session store lock poisoned".into()))?;
        guard.insert(id, record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

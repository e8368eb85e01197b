use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::config::SESSION_TOKEN_LEN;

#[derive(Debug, Clone, Copy)]
struct Session {
    user_id: i64,
    issued_at: Instant,
}

/// In-memory bearer sessions: token → user_id. Tokens expire `ttl` after
/// login and do not survive a restart.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            sessions: DashMap::new(),
            ttl,
        })
    }

    /// Issue a fresh random token for `user_id`. Expired sessions are swept
    /// first so the map stays bounded by the logins of one TTL window.
    pub fn create(&self, user_id: i64) -> String {
        self.purge_expired();

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_LEN)
            .map(char::from)
            .collect();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id,
                issued_at: Instant::now(),
            },
        );
        token
    }

    /// User behind `token`, or None if unknown or expired. Expired tokens are
    /// removed on sight.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        let session = *self.sessions.get(token)?.value();
        if session.issued_at.elapsed() >= self.ttl {
            self.sessions.remove(token);
            return None;
        }
        Some(session.user_id)
    }

    /// Returns true if the token existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop every session older than the TTL. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.issued_at.elapsed() < self.ttl);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!(removed, "Expired sessions purged");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

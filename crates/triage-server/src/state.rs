use std::collections::HashMap;
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use tokio::sync::Mutex;
use uuid::Uuid;

use triage_core::models::mode::Mode;
use triage_engine::session::DiagnosisSession;
use triage_engine::Engine;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(engine: Engine, session_ttl: SignedDuration) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Arc::new(Mutex::new(SessionStore::new(session_ttl))),
        }
    }
}

/// In-memory sessions keyed by id. Nothing survives a restart.
pub struct SessionStore {
    sessions: HashMap<Uuid, DiagnosisSession>,
    ttl: SignedDuration,
}

impl SessionStore {
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Store a new session, first evicting every idle one.
    pub fn insert(&mut self, session: DiagnosisSession) {
        self.evict_idle(Timestamp::now());
        self.sessions.insert(session.id(), session);
    }

    /// The session with this id, if it belongs to `mode` and has not gone
    /// idle. Idle sessions are evicted on every lookup as well as on insert.
    pub fn get_mut(&mut self, id: Uuid, mode: Mode) -> Option<&mut DiagnosisSession> {
        self.evict_idle(Timestamp::now());
        self.sessions.get_mut(&id).filter(|s| s.mode() == mode)
    }

    /// Drop sessions not touched within the TTL as of `now`.
    pub fn evict_idle(&mut self, now: Timestamp) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions
            .retain(|_, session| now.duration_since(session.updated_at()) < ttl);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

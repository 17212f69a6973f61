use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info};
use crate::config::Config;
use crate::execution::engine::OrderEngine;
use crate::execution::sizing::OrderSizer;
use crate::execution::types::{Fill, OrderIntent};
use crate::execution::validation::OrderRejection;
use crate::session::state::Session;
use crate::tool::launch::normalize_label;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Order rejected: {0}")]
    Rejected(#[from] OrderRejection),
}

/// Independent sessions keyed by id. Sessions never share state; the map is
/// the only thing shared between callers.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    config: Config,
    engine: OrderEngine,
    sizer: OrderSizer,
}

impl SessionStore {
    pub fn new(config: Config) -> Self {
        Self {
            sessions: DashMap::new(),
            engine: OrderEngine::new(&config),
            sizer: OrderSizer::new(&config.order),
            config,
        }
    }

    pub fn engine(&self) -> &OrderEngine {
        &self.engine
    }

    pub fn sizer(&self) -> &OrderSizer {
        &self.sizer
    }

    /// Open a session, or return the existing one untouched if `id` is
    /// already open.
    pub fn open(&self, id: &str, label: Option<&str>) -> Session {
        match self.sessions.entry(id.to_string()) {
            Entry::Occupied(entry) => {
                debug!("Session {} already open", id);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                let title = normalize_label(label, &self.config.session.default_title);
                info!("Opening session {}: {}", id, title);
                entry.insert(Session::new(title, &self.config.session)).value().clone()
            }
        }
    }

    /// Adopt a session built elsewhere. Returns false, leaving the existing
    /// session in place, if `id` is taken.
    pub fn insert(&self, id: &str, session: Session) -> bool {
        match self.sessions.entry(id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                info!("Adopting session {}: {}", id, session.market.title());
                entry.insert(session);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Run `f` against the session under its entry lock.
    pub fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, SessionError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::UnknownSession(id.to_string()))?;
        Ok(f(entry.value_mut()))
    }

    pub fn place_order(
        &self,
        id: &str,
        intent: &OrderIntent,
        now: DateTime<Utc>,
    ) -> Result<Fill, SessionError> {
        let engine = &self.engine;
        let fill = self.with_session(id, |session| session.place_order(engine, intent, now))??;
        Ok(fill)
    }

    pub fn close(&self, id: &str) -> Option<Session> {
        let removed = self.sessions.remove(id).map(|(_, session)| session);
        if removed.is_some() {
            info!("Closed session {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

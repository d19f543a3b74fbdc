//! In-memory session storage
//!
//! Dialog state lives for the process lifetime only; persistence across
//! restarts is out of scope. Access is keyed per user, and the host loop
//! processes one update at a time, so no two events for the same session
//! ever race on this map.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::{DialogState, Session};
use crate::domain::traits::SessionStore;

/// Session store backed by a shared in-memory map.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, DialogState>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user_id: &str) -> Result<Session, StorageError> {
        let sessions = self.sessions.read().await;
        let state = sessions.get(user_id).copied().unwrap_or_default();
        Ok(Session::new(user_id).with_state(state))
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.user_id.clone(), session.state);
        Ok(())
    }
}

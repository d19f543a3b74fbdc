use async_trait::async_trait;

use crate::application::errors::StorageError;
use crate::domain::entities::Session;

/// SessionStore trait - per-user dialog state keyed by user identity.
///
/// Sessions are created on first contact and never explicitly destroyed;
/// the last-known state persists for the host process lifetime.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session for a user, creating an idle one on first contact.
    async fn load(&self, user_id: &str) -> Result<Session, StorageError>;

    /// Persist the session's current state.
    async fn save(&self, session: &Session) -> Result<(), StorageError>;
}

//! Durable session storage.

use super::models::{Session, UserSummary};
use crate::storage::{KeyValueStore, StorageResult, TOKEN_KEY, USER_KEY};
use log::warn;
use std::fmt;
use std::sync::Arc;

/// Reads and writes the `token` and `user` keys
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the stored session, if any
    ///
    /// A token without a readable user still counts as a session; the user
    /// summary is then `None`.
    pub fn load(&self) -> Option<Session> {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                warn!("Failed to read session token: {}", e);
                return None;
            }
        };

        let user = self
            .store
            .get(USER_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<UserSummary>(&raw).ok());

        Some(Session { token, user })
    }

    /// Persist both keys
    pub fn save(&self, session: &Session) -> StorageResult<()> {
        self.store.set(TOKEN_KEY, &session.token)?;
        match &session.user {
            Some(user) => self.store.set(USER_KEY, &serde_json::to_string(user)?),
            None => self.store.remove(USER_KEY),
        }
    }

    /// Remove both keys
    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }
}
